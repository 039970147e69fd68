//! Command-line interface for vault-enricher.
//!
//! This module provides the `enrich`, `scan`, `validate` and `config`
//! commands.

mod commands;

pub use commands::{Cli, Commands, run_command};
