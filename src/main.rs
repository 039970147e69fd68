//! Vault Enricher - fills an Obsidian music vault with MusicBrainz metadata.
//!
//! Artist and album notes are matched to catalog entries (by a stored
//! identifier or a name search), and the fetched metadata is merged into their
//! front matter without overwriting anything the user wrote.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod document;
pub mod enrichment;
pub mod error;
pub mod scanner;
#[cfg(test)]
pub mod test_utils;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Level used when neither the command line nor the config file sets one
const DEFAULT_LOG_LEVEL: &str = "INFO";

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();

    // Read the config before logging is up; report problems once it is
    let loaded = config::try_load();

    let level_name = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let level = config::filter_level(&level_name).ok_or_else(|| {
        anyhow::anyhow!("Unknown log level {level_name:?} (expected DEBUG, INFO, WARNING or ERROR)")
    })?;

    // Initialize logging (RUST_LOG wins over the configured level)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("vault_enricher={level}")))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("{}; using default configuration", e);
        config::Config::default()
    });
    config.validate()?;

    cli::run_command(&args, &config)
}
