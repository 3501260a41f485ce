//! Content digesting using blake3.
//!
//! A fingerprint is derived from file bytes alone: identical contents
//! produce identical digests regardless of path, size, or mtime, and any
//! one-byte change produces a different digest.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::error::FingerprintError;

/// Width of a fingerprint in hex characters (128 bits of blake3).
pub const DIGEST_LEN: usize = 32;

/// Compute the content digest of a file, streaming in 64 KiB chunks.
///
/// Returns the blake3 hash hex-encoded and truncated to [`DIGEST_LEN`]
/// lowercase characters. Any read failure aborts with the underlying
/// error attached; a partially hashed file never yields a digest.
pub fn digest_file(path: &Path) -> Result<String, FingerprintError> {
    let file = File::open(path)
        .map_err(|e| FingerprintError::Digest(path.to_path_buf(), e))?;

    let mut reader = BufReader::with_capacity(64 * 1024, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; 64 * 1024];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&buffer[..n]);
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FingerprintError::Digest(path.to_path_buf(), e)),
        }
    }

    let mut hex = hex::encode(hasher.finalize().as_bytes());
    hex.truncate(DIGEST_LEN);
    Ok(hex)
}
