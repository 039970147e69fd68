//! Config file command.

use std::process::ExitCode;

use crate::config::{self, Config};

/// Print the config file location and effective settings.
///
/// With `init`, writes them to the config file unless one already exists.
pub fn cmd_config(config: &Config, init: bool) -> anyhow::Result<ExitCode> {
    let path = config::config_path().ok_or(config::ConfigError::NoConfigDir)?;
    println!("Config file: {}", path.display());

    if init {
        if path.exists() {
            println!("Config file already exists; leaving it unchanged.");
        } else {
            config::save(config)?;
            println!("✓ Wrote default settings");
        }
    }

    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}
