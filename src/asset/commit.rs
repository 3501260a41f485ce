//! On-disk rename of an asset to its fingerprinted name.

use std::fs;
use std::path::Path;

use super::error::FingerprintError;

/// Rename `original` to `fingerprinted`, same directory, contents untouched.
///
/// The destination must not exist: `fs::rename` silently replaces an
/// existing file on Unix, so the collision is checked explicitly and
/// reported as a typed error instead.
pub fn commit_rename(original: &Path, fingerprinted: &Path) -> Result<(), FingerprintError> {
    if fingerprinted.exists() {
        return Err(FingerprintError::Collision(fingerprinted.to_path_buf()));
    }

    fs::rename(original, fingerprinted).map_err(|e| FingerprintError::Rename {
        from: original.to_path_buf(),
        to: fingerprinted.to_path_buf(),
        source: e,
    })
}
