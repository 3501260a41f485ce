//! Utility modules for the fingerprinting pipeline.

pub mod mime;
pub mod path;
