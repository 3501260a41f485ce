//! Filesystem path normalization.

use std::path::{Path, PathBuf};

/// Make a path absolute.
///
/// `canonicalize()` when the path exists (resolving symlinks, `.` and
/// `..`); otherwise absolute paths pass through unchanged and relative
/// ones are anchored at the current directory.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let path = Path::new("/absolute/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
        assert_eq!(normalized, PathBuf::from("/absolute/path/file.txt"));
    }

    #[test]
    fn test_normalize_path_relative() {
        let path = Path::new("relative/path/file.txt");
        let normalized = normalize_path(path);
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_resolves_dots() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        let dotted = dir.path().join("a/b/../b");
        let normalized = normalize_path(&dotted);
        assert!(normalized.ends_with("a/b"));
        assert!(!normalized.to_string_lossy().contains(".."));
    }
}
