//! The build pass: walk, digest, rename, register.
//!
//! A [`Fingerprinter`] exists only while the build runs. `run` (or
//! `add_file` + `finish`) consumes it and yields the sealed
//! [`FingerprintIndex`]; on any error the partial index is dropped with
//! the builder, so callers can never observe a half-built mapping.

use parking_lot::Mutex;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::debug;

use super::commit::commit_rename;
use super::digest::digest_file;
use super::error::FingerprintError;
use super::index::FingerprintIndex;
use super::path::{fingerprinted_file, fingerprinted_path};
use super::walk::collect_files;

/// One-shot builder for a [`FingerprintIndex`].
pub struct Fingerprinter {
    /// Assets root on disk.
    root: PathBuf,
    /// URL prefix logical paths are keyed under, without trailing slash.
    prefix: String,
    index: FingerprintIndex,
}

impl Fingerprinter {
    pub fn new(root: impl Into<PathBuf>, url_prefix: &str) -> Self {
        Self {
            root: root.into(),
            prefix: normalize_prefix(url_prefix),
            index: FingerprintIndex::new(),
        }
    }

    /// Fingerprint every file under the given subdirectories of the root.
    ///
    /// Files are digested and renamed on rayon workers with a shared
    /// first-error abort; registration happens afterwards in walk order.
    /// Any failure aborts the whole build and surfaces the root cause.
    pub fn run(mut self, subdirs: &[String]) -> Result<FingerprintIndex, FingerprintError> {
        let files = collect_files(&self.root, subdirs)?;

        let has_error = AtomicBool::new(false);
        let first_error: Mutex<Option<FingerprintError>> = Mutex::new(None);

        let processed: Vec<Option<(String, String)>> = files
            .par_iter()
            .map(|path| {
                if has_error.load(Ordering::Relaxed) {
                    return None;
                }
                match self.process_file(path) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        if !has_error.swap(true, Ordering::Relaxed) {
                            *first_error.lock() = Some(e);
                        }
                        None
                    }
                }
            })
            .collect();

        if let Some(e) = first_error.lock().take() {
            return Err(e);
        }

        for (logical, fingerprinted) in processed.into_iter().flatten() {
            self.index.insert(logical, fingerprinted);
        }

        Ok(self.finish())
    }

    /// Fingerprint a single file and register it.
    ///
    /// Same digest-rename-register sequence as [`run`](Self::run), scoped
    /// to one file.
    pub fn add_file(&mut self, path: &Path) -> Result<(), FingerprintError> {
        let (logical, fingerprinted) = self.process_file(path)?;
        self.index.insert(logical, fingerprinted);
        Ok(())
    }

    /// Seal the index. No insertion is possible afterwards.
    pub fn finish(self) -> FingerprintIndex {
        self.index
    }

    /// digest -> derive paths -> rename. Returns the (logical,
    /// fingerprinted) pair for registration.
    fn process_file(&self, path: &Path) -> Result<(String, String), FingerprintError> {
        let digest = digest_file(path)?;

        let rel = path
            .strip_prefix(&self.root)
            .map_err(|_| FingerprintError::OutsideRoot(path.to_path_buf()))?;
        let rel_str = rel.to_string_lossy().replace('\\', "/");
        let logical = format!("{}/{rel_str}", self.prefix);
        let fingerprinted = fingerprinted_path(&logical, &digest);

        commit_rename(path, &fingerprinted_file(path, &digest))?;
        debug!("build"; "{logical} -> {fingerprinted}");

        Ok((logical, fingerprinted))
    }
}

/// Trim a URL prefix to the keyed form: leading slash, no trailing slash.
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
