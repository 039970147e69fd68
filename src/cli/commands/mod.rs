//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `enrich`: fetch catalog metadata into vault notes
//! - `scan`: classification report
//! - `validate`: completeness report
//! - `setup`: show or create the config file

mod enrich;
mod scan;
mod setup;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tokio::runtime::Runtime;

use crate::config::{Config, MIN_RATE_LIMIT_SECONDS};
use crate::enrichment::EnrichOptions;

pub use enrich::cmd_enrich;
pub use scan::cmd_scan;
pub use setup::cmd_config;
pub use validate::cmd_validate;

/// Enrich an Obsidian music vault with MusicBrainz metadata
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log level: DEBUG, INFO, WARNING or ERROR (default: config file, then INFO)
    #[arg(long, global = true, env = "VAULT_ENRICHER_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch metadata for artist and album notes
    Enrich {
        /// Vault root (default: `[vault] path` from the config file)
        #[arg(env = "VAULT_ENRICHER_VAULT")]
        vault: Option<PathBuf>,
        /// Preview changes without modifying any note
        #[arg(long)]
        dry_run: bool,
        /// Re-fetch notes that already have an identifier and genres
        #[arg(long)]
        force: bool,
        /// Minimum seconds between catalog requests
        #[arg(long, env = "VAULT_ENRICHER_RATE_LIMIT")]
        rate_limit: Option<f64>,
    },
    /// List artist and album notes and whether they need enrichment
    Scan {
        /// Vault root (default: `[vault] path` from the config file)
        #[arg(env = "VAULT_ENRICHER_VAULT")]
        vault: Option<PathBuf>,
    },
    /// Report notes with missing metadata
    Validate {
        /// Vault root (default: `[vault] path` from the config file)
        #[arg(env = "VAULT_ENRICHER_VAULT")]
        vault: Option<PathBuf>,
    },
    /// Show the config file location and effective settings
    Config {
        /// Write the current settings to the config file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// Returns the process exit code: failure when any note errored (`enrich`) or
/// is incomplete (`validate`).
pub fn run_command(cli: &Cli, config: &Config) -> anyhow::Result<ExitCode> {
    let rt = Runtime::new()?;

    match &cli.command {
        Commands::Enrich {
            vault,
            dry_run,
            force,
            rate_limit,
        } => {
            let vault = resolve_vault(vault.as_deref(), config)?;
            let options = EnrichOptions {
                dry_run: *dry_run || config.enrichment.dry_run,
                force: *force || config.enrichment.refresh_all,
            };
            let rate_limit = resolve_rate_limit(*rate_limit, config)?;
            cmd_enrich(&rt, &vault, options, rate_limit, config.enrichment.cover_size)
        }
        Commands::Scan { vault } => cmd_scan(&resolve_vault(vault.as_deref(), config)?),
        Commands::Validate { vault } => cmd_validate(&resolve_vault(vault.as_deref(), config)?),
        Commands::Config { init } => cmd_config(config, *init),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Vault from the command line, else from the config file.
pub(crate) fn resolve_vault(arg: Option<&Path>, config: &Config) -> anyhow::Result<PathBuf> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.vault.path.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No vault given. Pass a VAULT path, set VAULT_ENRICHER_VAULT, \
                 or set [vault] path in the config file."
            )
        })
}

/// Rate limit from the command line, else from the config file.
pub(crate) fn resolve_rate_limit(arg: Option<f64>, config: &Config) -> anyhow::Result<Duration> {
    let Some(seconds) = arg else {
        return Ok(config.enrichment.rate_limit());
    };
    if !seconds.is_finite() || seconds < MIN_RATE_LIMIT_SECONDS {
        anyhow::bail!("--rate-limit must be at least {MIN_RATE_LIMIT_SECONDS} seconds, got {seconds}");
    }
    Ok(Duration::from_secs_f64(seconds))
}

/// Path relative to the vault root, for display
pub(crate) fn display_path(path: &Path, vault: &Path) -> String {
    path.strip_prefix(vault)
        .unwrap_or(path)
        .display()
        .to_string()
}
