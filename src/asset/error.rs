//! Fingerprinting error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fingerprinting an asset tree.
///
/// Every variant is fatal to the build: the partially built index is
/// dropped and never handed to callers.
#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to walk `{0}`")]
    Walk(PathBuf, #[source] std::io::Error),

    #[error("failed to read `{0}`")]
    Digest(PathBuf, #[source] std::io::Error),

    #[error("fingerprinted path already exists: `{0}`")]
    Collision(PathBuf),

    #[error("failed to rename `{from}` to `{to}`")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset is not under the assets root: `{0}`")]
    OutsideRoot(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_error_display() {
        let err = FingerprintError::Digest(
            PathBuf::from("static/css/site.css"),
            Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let display = format!("{err}");
        assert!(display.contains("failed to read"));
        assert!(display.contains("static/css/site.css"));

        let err = FingerprintError::Collision(PathBuf::from("a.123.css"));
        assert!(format!("{err}").contains("already exists"));
    }
}
