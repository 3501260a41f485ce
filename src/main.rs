//! Cachebust - content fingerprinting and forever-cache serving for static assets.

#![allow(dead_code)]

mod asset;
mod cli;
mod config;
mod core;
mod logger;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = Config::load(cli)?;

    match &cli.command {
        Commands::Build { .. } => cli::build::run(&config),
        Commands::Serve { .. } => cli::serve::run(&config),
    }
}
