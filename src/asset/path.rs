//! Fingerprinted-path derivation. Pure string transforms, no I/O.
//!
//! The digest is inserted dot-delimited before the final extension of the
//! last path segment: `/static/css/site.css` becomes
//! `/static/css/site.<digest>.css`. Files without an extension get the
//! digest appended. For dotfiles the whole name is the extension, so the
//! digest lands in front: `.gitignore` becomes `.<digest>.gitignore`.

use std::path::{Path, PathBuf};

/// Insert a digest before the extension of a URL-style path.
pub fn fingerprinted_path(path: &str, digest: &str) -> String {
    match path.rsplit_once('/') {
        Some((dir, name)) => format!("{dir}/{}", fingerprinted_name(name, digest)),
        None => fingerprinted_name(path, digest),
    }
}

/// Insert a digest before the extension of a single filename.
pub fn fingerprinted_name(name: &str, digest: &str) -> String {
    match name.rfind('.') {
        Some(idx) => format!("{}.{digest}{}", &name[..idx], &name[idx..]),
        None => format!("{name}.{digest}"),
    }
}

/// Derive the on-disk fingerprinted location for a file.
///
/// Only the final component changes; the parent directory is untouched.
/// A file whose name is not valid UTF-8 comes back unchanged and is
/// rejected later by the commit collision check.
pub fn fingerprinted_file(path: &Path, digest: &str) -> PathBuf {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => path.with_file_name(fingerprinted_name(name, digest)),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIGEST: &str = "66189abc248d80832e458ee37e93c9e8";

    #[test]
    fn test_digest_inserted_before_extension() {
        assert_eq!(
            fingerprinted_path("/static/image/favicon/favicon.ico", DIGEST),
            "/static/image/favicon/favicon.66189abc248d80832e458ee37e93c9e8.ico"
        );
        assert_eq!(
            fingerprinted_path("/static/css/site.css", DIGEST),
            format!("/static/css/site.{DIGEST}.css")
        );
    }

    #[test]
    fn test_no_extension_appends() {
        assert_eq!(fingerprinted_path("/static/LICENSE", DIGEST), format!("/static/LICENSE.{DIGEST}"));
        assert_eq!(fingerprinted_name("README", DIGEST), format!("README.{DIGEST}"));
    }

    #[test]
    fn test_hidden_file_name_is_the_extension() {
        // A dotfile's whole name is its extension, so the digest goes first
        assert_eq!(fingerprinted_name(".gitignore", DIGEST), format!(".{DIGEST}.gitignore"));
        assert_eq!(
            fingerprinted_path("/static/.htaccess", DIGEST),
            format!("/static/.{DIGEST}.htaccess")
        );
    }

    #[test]
    fn test_multi_dot_uses_last_extension() {
        assert_eq!(
            fingerprinted_path("/static/js/jquery.min.js", DIGEST),
            format!("/static/js/jquery.min.{DIGEST}.js")
        );
    }

    #[test]
    fn test_dotted_directories_ignored() {
        assert_eq!(
            fingerprinted_path("/static/v1.2/app", DIGEST),
            format!("/static/v1.2/app.{DIGEST}")
        );
    }

    #[test]
    fn test_bare_name_without_slash() {
        assert_eq!(fingerprinted_path("site.css", DIGEST), format!("site.{DIGEST}.css"));
    }

    #[test]
    fn test_fingerprinted_file_keeps_parent() {
        let path = Path::new("/srv/static/css/site.css");
        assert_eq!(
            fingerprinted_file(path, DIGEST),
            PathBuf::from(format!("/srv/static/css/site.{DIGEST}.css"))
        );
    }
}
