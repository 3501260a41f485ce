//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Cachebust asset fingerprinting CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Assets directory path (relative to project root)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Config file path (default: cachebust.toml)
    #[arg(short = 'C', long, default_value = "cachebust.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fingerprint the asset tree in place
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Fingerprint the asset tree, then serve it over HTTP
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Shared build arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    /// URL prefix mapped to the assets root (e.g., /static)
    #[arg(short = 'u', long = "url-prefix")]
    pub url_prefix: Option<String>,

    /// Subdirectories of the assets root to fingerprint (comma-separated).
    ///
    /// Defaults to the whole assets root. An empty string names the root
    /// itself, so `--subdirs css,js` and `--subdirs ""` differ: the first
    /// touches two subtrees, the second everything.
    #[arg(short, long, value_delimiter = ',')]
    pub subdirs: Option<Vec<String>>,

    /// Write the fingerprinted paths to this file after the build
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}
