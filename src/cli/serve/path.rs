//! URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Normalize URL: decode, strip query string, trim slashes
pub fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

/// Strip the mount prefix from a URL path, respecting segment boundaries.
///
/// Returns the root-relative remainder without leading slashes, or `None`
/// when the URL is outside the prefix (`/staticfoo` does not match
/// `/static`). An empty prefix mounts the whole URL space.
pub fn strip_url_prefix<'a>(url: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return Some(url.trim_start_matches('/'));
    }
    match url.strip_prefix(prefix) {
        Some(rest) if rest.is_empty() => Some(rest),
        Some(rest) if rest.starts_with('/') => Some(rest.trim_start_matches('/')),
        _ => None,
    }
}

/// Resolve a root-relative path to a file on disk, handling index.html
/// for directories
pub fn resolve_file(rel: &str, serve_root: &Path) -> Option<PathBuf> {
    // Reject paths with suspicious patterns early
    if rel.contains("..") {
        return None;
    }

    let local = serve_root.join(rel);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    // This prevents traversal via symlinks or encoded sequences
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        // Path escapes serve_root - reject
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}
