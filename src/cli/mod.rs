//! Command-line interface for catalog-rs
//!
//! - Argument parsing with clap
//! - Configuration merging (CLI args over config files)
//! - Command handlers for `serve` and `migrate`

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::Settings;
use crate::logger::init_logger;

/// Resolve the environment from `--env` or `CATALOG_APP_ENV`
pub fn resolve_environment(cli: &Cli) -> crate::config::Environment {
    cli.env
        .map(Into::into)
        .unwrap_or_else(crate::config::Environment::from_env)
}

/// Load file configuration, apply CLI overrides and validate the result
pub fn load_and_merge_config(
    cli: &Cli,
    environment: crate::config::Environment,
) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::load(cli.config.as_deref(), environment)
        .context("Failed to load configuration")?;

    merger
        .merge_cli_args(cli)
        .context("Invalid configuration")
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Invalid logger configuration")?;

    init_logger(logger_config).context("Failed to initialize logger")
}

/// Parse-to-exit entry point used by `main`
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let environment = resolve_environment(&cli);
    let settings = load_and_merge_config(&cli, environment)?;
    init_logger_from_settings(&settings)?;

    execute_command(&cli, settings, environment).await
}
