//! The fingerprint index: logical asset path to fingerprinted path.
//!
//! Built exactly once at startup by [`super::build::Fingerprinter`] and
//! read-only afterwards. The serve layer shares it behind an `Arc`, so
//! concurrent lookups need no locking; nothing can write after the
//! builder seals it.

use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::io;
use std::path::Path;

use crate::debug;

/// Immutable mapping from logical to fingerprinted asset paths.
#[derive(Debug, Default)]
pub struct FingerprintIndex {
    /// logical path -> fingerprinted path
    entries: FxHashMap<String, String>,
    /// Keys in registration order; manifest output sorts a copy.
    keys: Vec<String>,
    /// Every fingerprinted path, for cache-policy membership tests.
    fingerprinted: FxHashSet<String>,
}

impl FingerprintIndex {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, logical: String, fingerprinted: String) {
        self.fingerprinted.insert(fingerprinted.clone());
        self.entries.insert(logical.clone(), fingerprinted);
        self.keys.push(logical);
    }

    /// Look up the fingerprinted path for a logical asset path.
    ///
    /// A miss is not an error: callers fall back to the logical path and
    /// lose caching, nothing else. The miss is logged when --verbose is on.
    pub fn get(&self, logical: &str) -> Option<&str> {
        match self.entries.get(logical) {
            Some(fingerprinted) => Some(fingerprinted),
            None => {
                debug!("index"; "no fingerprint registered for {logical}");
                None
            }
        }
    }

    /// Whether `path` is a registered fingerprinted path.
    ///
    /// Only these may be served with forever-cache headers; a stale body
    /// under any other URL could otherwise be pinned for a year.
    pub fn is_fingerprinted(&self, path: &str) -> bool {
        self.fingerprinted.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the manifest: one fingerprinted path per line, sorted by
    /// logical path so identical builds produce byte-identical files.
    pub fn write_manifest(&self, path: &Path) -> io::Result<()> {
        let mut keys = self.keys.clone();
        keys.sort();

        let mut out = String::with_capacity(keys.len() * 64);
        for key in &keys {
            if let Some(fingerprinted) = self.entries.get(key) {
                out.push_str(fingerprinted);
                out.push('\n');
            }
        }

        fs::write(path, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> FingerprintIndex {
        let mut index = FingerprintIndex::new();
        index.insert(
            "/static/js/site.js".into(),
            "/static/js/site.aaaa.js".into(),
        );
        index.insert(
            "/static/css/site.css".into(),
            "/static/css/site.bbbb.css".into(),
        );
        index
    }

    #[test]
    fn test_get_hit_and_miss() {
        let index = sample();
        assert_eq!(index.get("/static/css/site.css"), Some("/static/css/site.bbbb.css"));
        assert_eq!(index.get("/static/css/other.css"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_is_fingerprinted_tracks_values_not_keys() {
        let index = sample();
        assert!(index.is_fingerprinted("/static/js/site.aaaa.js"));
        assert!(!index.is_fingerprinted("/static/js/site.js"));
    }

    #[test]
    fn test_manifest_sorted_by_logical_path() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("manifest.txt");

        // Registration order differs from sorted order
        sample().write_manifest(&manifest).unwrap();

        let content = std::fs::read_to_string(&manifest).unwrap();
        assert_eq!(
            content,
            "/static/css/site.bbbb.css\n/static/js/site.aaaa.js\n"
        );
    }

    #[test]
    fn test_manifest_stable_across_builds() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");

        sample().write_manifest(&first).unwrap();
        sample().write_manifest(&second).unwrap();

        assert_eq!(
            std::fs::read_to_string(&first).unwrap(),
            std::fs::read_to_string(&second).unwrap()
        );
    }
}
