//! Build command: fingerprint the asset tree.

use crate::{
    asset::{FingerprintIndex, Fingerprinter},
    config::Config,
    log,
};
use anyhow::{Context, Result};
use std::time::Instant;

/// Run a standalone build.
pub fn run(config: &Config) -> Result<()> {
    build_index(config).map(|_| ())
}

/// Fingerprint the configured subtrees and seal the index.
///
/// Shared by the build and serve commands; serve keeps the returned
/// index for request routing.
pub fn build_index(config: &Config) -> Result<FingerprintIndex> {
    let start = Instant::now();
    let subdirs = config.assets.effective_subdirs();

    let index =
        Fingerprinter::new(&config.assets.root, &config.assets.url_prefix).run(&subdirs)?;

    log!(
        "build";
        "fingerprinted {} assets under {} in {:?}",
        index.len(),
        config.assets.root.display(),
        start.elapsed()
    );

    if let Some(manifest) = &config.assets.manifest {
        index
            .write_manifest(manifest)
            .with_context(|| format!("Failed to write manifest {}", manifest.display()))?;
        log!("build"; "manifest -> {}", manifest.display());
    }

    Ok(index)
}
