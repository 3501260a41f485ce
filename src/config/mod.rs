//! Project configuration for `cachebust.toml`.
//!
//! # Sections
//!
//! | Section    | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `[assets]` | Assets root, URL prefix, subdirs, manifest     |
//! | `[serve]`  | HTTP server (interface, port)                  |
//!
//! The config file is optional: every field has a default and can be
//! overridden from the CLI, so a bare `cachebust serve` works in a
//! directory holding a `static/` tree.

mod error;

pub use error::ConfigError;

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cachebust.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Asset tree settings
    #[serde(default)]
    pub assets: AssetsConfig,

    /// HTTP server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            assets: AssetsConfig::default(),
            serve: ServeConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file; a missing file falls
    /// back to defaults. The project root is the config file's parent
    /// directory (or cwd when no file exists).
    pub fn load(cli: &Cli) -> Result<Self> {
        let (config_path, exists) = Self::resolve_config_path(cli)?;

        let mut config = if exists {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };

        config.config_path = crate::utils::path::normalize_path(&config_path);
        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.root = crate::utils::path::normalize_path(&root);

        config.apply_command_options(cli);
        config.assets.validate()?;

        let root = config.root.clone();
        config.assets.normalize(&root);

        if !exists {
            debug!("config"; "{} not found, using defaults", cli.config.display());
        }

        Ok(config)
    }

    /// Resolve config file path by searching upward from cwd.
    fn resolve_config_path(cli: &Cli) -> Result<(PathBuf, bool)> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        match find_config_file(&cli.config) {
            Some(path) => Ok((path, true)),
            None => Ok((cwd.join(&cli.config), false)),
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        // Show only the filename since the file sits at the project root
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        Self::update_option(&mut self.assets.root, cli.root.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                self.apply_build_args(build_args);
            }
            Commands::Serve {
                build_args,
                interface,
                port,
            } => {
                self.apply_build_args(build_args);
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        // Set verbose mode globally
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.assets.url_prefix, args.url_prefix.as_ref());

        if args.subdirs.is_some() {
            self.assets.subdirs = args.subdirs.clone();
        }
        if args.manifest.is_some() {
            self.assets.manifest = args.manifest.clone();
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }
}

// ============================================================================
// [assets] section
// ============================================================================

/// `[assets]` section: what to fingerprint and where it lives.
///
/// ```toml
/// [assets]
/// root = "static"             # Asset tree on disk, relative to project root
/// url_prefix = "/static"      # URL prefix the tree is mounted under
/// subdirs = ["css", "js"]     # Subtrees to fingerprint (default: whole root)
/// manifest = "manifest.txt"   # Fingerprinted path listing (optional)
/// ```
///
/// The build renames files inside `root` in place. Run it against a fresh
/// copy of the tree each time; a second pass over an already-fingerprinted
/// tree would embed a second digest in every name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Assets directory, relative to the project root.
    pub root: PathBuf,

    /// URL prefix the assets root is mounted under.
    /// Empty string mounts the tree at the server root.
    pub url_prefix: String,

    /// Subdirectories of the root to fingerprint.
    /// - unset (default): the whole root
    /// - `[""]`: also the whole root
    /// - `[]`: nothing
    pub subdirs: Option<Vec<String>>,

    /// File listing all fingerprinted paths, written after each build.
    pub manifest: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
            url_prefix: String::from("/static"),
            subdirs: None,
            manifest: None,
        }
    }
}

impl AssetsConfig {
    /// Subdirectory list handed to the build.
    ///
    /// `None` becomes a single empty-string entry, which names the root
    /// itself. An explicit empty list stays empty and fingerprints nothing.
    pub fn effective_subdirs(&self) -> Vec<String> {
        match &self.subdirs {
            Some(subdirs) => subdirs.clone(),
            None => vec![String::new()],
        }
    }

    /// Validate the section before path normalization.
    ///
    /// Subdir entries must stay inside the assets root, so parent and
    /// absolute components are rejected here while they are still visible.
    fn validate(&self) -> Result<()> {
        if !self.url_prefix.is_empty() && !self.url_prefix.starts_with('/') {
            bail!(ConfigError::Validation(format!(
                "assets.url_prefix must start with '/' (got '{}')",
                self.url_prefix
            )));
        }

        for subdir in self.subdirs.iter().flatten() {
            for comp in Path::new(subdir).components() {
                match comp {
                    Component::ParentDir => bail!(ConfigError::Validation(format!(
                        "assets.subdirs entry '{subdir}': parent directory '..' not allowed"
                    ))),
                    Component::Prefix(_) | Component::RootDir => {
                        bail!(ConfigError::Validation(format!(
                            "assets.subdirs entry '{subdir}': absolute paths not allowed"
                        )))
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Normalize paths relative to the project root.
    fn normalize(&mut self, root: &Path) {
        self.root = crate::utils::path::normalize_path(&root.join(&self.root));
        if let Some(manifest) = self.manifest.take() {
            self.manifest = Some(crate::utils::path::normalize_path(&root.join(manifest)));
        }
    }
}

// ============================================================================
// [serve] section
// ============================================================================

/// `[serve]` section: HTTP server settings.
///
/// ```toml
/// [serve]
/// interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
/// port = 8080                 # HTTP port number
/// ```
///
/// Use `interface = "0.0.0.0"` to make the server accessible from LAN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,
        }
    }
}

// ============================================================================
// config file discovery
// ============================================================================

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    // First check if config_name is an absolute path or exists in cwd
    if config_name.is_absolute() && config_name.exists() {
        return Some(config_name.to_path_buf());
    }

    // Walk up from cwd looking for config file
    let mut current = cwd.as_path();
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        // Move to parent directory
        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_parse_config`)
// ============================================================================

/// Parse config from a TOML string.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
