//! Asset fingerprinting: walk, digest, rename, register.

mod build;
mod commit;
mod digest;
mod error;
mod index;
mod path;
mod walk;

// Build phase
pub use build::Fingerprinter;
pub(crate) use build::normalize_prefix;
pub use error::FingerprintError;

// Ready phase (read-only)
pub use index::FingerprintIndex;
