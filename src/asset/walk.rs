//! Asset tree walking.

use jwalk::WalkDir;
use std::io;
use std::path::{Path, PathBuf};

use super::error::FingerprintError;

/// Collect every regular file under the given subdirectories of `root`.
///
/// An empty subdirectory name means the root itself. Directories are
/// skipped, files are taken regardless of extension, and any unreadable
/// entry aborts the walk; partial listings are never returned. The result
/// is sorted (and deduplicated, so overlapping subdirectories collapse)
/// for deterministic scheduling.
pub fn collect_files(root: &Path, subdirs: &[String]) -> Result<Vec<PathBuf>, FingerprintError> {
    let mut files = Vec::new();

    for sub in subdirs {
        let dir = if sub.is_empty() {
            root.to_path_buf()
        } else {
            root.join(sub)
        };
        if !dir.is_dir() {
            return Err(FingerprintError::Walk(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        for entry in WalkDir::new(&dir) {
            let entry = entry.map_err(|e| FingerprintError::Walk(dir.clone(), io::Error::other(e)))?;
            if entry.file_type().is_file() {
                files.push(entry.path());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
