//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\vault-enricher\config.toml
//! - macOS: ~/Library/Application Support/vault-enricher/config.toml
//! - Linux: ~/.config/vault-enricher/config.toml
//!
//! The config file is human-readable and editable. Command-line flags (and
//! their environment variables) override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::CoverSize;

/// Smallest accepted gap between catalog requests, in seconds
pub const MIN_RATE_LIMIT_SECONDS: f64 = 0.1;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault location
    pub vault: VaultConfig,

    /// Enrichment run settings
    pub enrichment: EnrichmentConfig,

    /// Log output
    pub logging: LoggingConfig,
}

/// Vault settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Default vault root when none is given on the command line
    pub path: Option<PathBuf>,
}

/// Enrichment run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Minimum seconds between two catalog requests
    pub rate_limit_seconds: f64,

    /// Preview changes without writing notes
    pub dry_run: bool,

    /// Re-fetch notes that already have an identifier and genres
    pub refresh_all: bool,

    /// Cover image size linked from album notes
    pub cover_size: CoverSize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            rate_limit_seconds: 2.0,
            dry_run: false,
            refresh_all: false,
            cover_size: CoverSize::default(),
        }
    }
}

impl EnrichmentConfig {
    pub fn rate_limit(&self) -> Duration {
        Duration::from_secs_f64(self.rate_limit_seconds.max(MIN_RATE_LIMIT_SECONDS))
    }
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// DEBUG, INFO, WARNING or ERROR
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
        }
    }
}

/// Map a configured level name to a `tracing` filter level.
///
/// Case-insensitive; `WARNING` and `WARN` are the same level.
pub fn filter_level(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARNING" | "WARN" => Some("warn"),
        "ERROR" => Some("error"),
        _ => None,
    }
}

impl Config {
    /// Reject values the run cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.enrichment.rate_limit_seconds;
        if !rate.is_finite() || rate < MIN_RATE_LIMIT_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "rate_limit_seconds must be at least {MIN_RATE_LIMIT_SECONDS}, got {rate}"
            )));
        }

        if filter_level(&self.logging.level).is_none() {
            return Err(ConfigError::Invalid(format!(
                "unknown log level {:?} (expected DEBUG, INFO, WARNING or ERROR)",
                self.logging.level
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vault-enricher"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// A missing file (or no config directory) yields defaults. An unreadable or
/// unparsable file is an error; the caller decides whether to fall back.
pub fn try_load() -> Result<Config, ConfigError> {
    match config_path() {
        Some(path) => try_load_from(&path),
        None => Ok(Config::default()),
    }
}

/// Load configuration from a specific file. A missing file yields defaults.
pub fn try_load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    let config = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to disk
///
/// Creates the config directory if it doesn't exist.
pub fn save(config: &Config) -> Result<(), ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)
}

/// Save configuration to a specific file.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
