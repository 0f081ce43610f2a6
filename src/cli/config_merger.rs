//! Merges CLI overrides into file and environment configuration.
//!
//! Precedence, lowest to highest: config files, `CATALOG_*` variables,
//! global flags (`--verbose`/`--quiet`), then `serve` arguments.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::{ConfigError, ConfigLoader, Environment, Settings};

/// Holds the loaded base configuration until CLI overrides are applied
#[derive(Debug)]
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration from `--config` or the config directory.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so
    /// that a CLI override can fix a value the files get wrong.
    pub fn load(config_path: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => ConfigLoader::from_file(path),
            None => ConfigLoader::new()?,
        }
        .with_environment(environment);

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Apply CLI overrides on a copy of the base configuration and validate it
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            // --log-level beats --verbose/--quiet
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/catalog".to_string();
        config.jwt.secret = "merger-secret-that-is-longer-than-32-chars".to_string();
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_no_flags_keeps_base_config() {
        let merged = merge(&["catalog-rs"]).unwrap();
        assert_eq!(merged, valid_base_config());
    }

    #[test]
    fn test_verbose_sets_debug_level() {
        let merged = merge(&["catalog-rs", "--verbose"]).unwrap();
        assert_eq!(merged.logger.level, "debug");
    }

    #[test]
    fn test_quiet_sets_error_level() {
        let merged = merge(&["catalog-rs", "--quiet"]).unwrap();
        assert_eq!(merged.logger.level, "error");
    }

    #[test]
    fn test_serve_overrides_host_and_port() {
        let merged = merge(&["catalog-rs", "serve", "--host", "0.0.0.0", "--port", "8080"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_overrides_global_flag() {
        let merged = merge(&["catalog-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_leaves_server_untouched() {
        let merged = merge(&["catalog-rs", "migrate", "--dry-run"]).unwrap();
        assert_eq!(merged.server, valid_base_config().server);
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["catalog-rs"]).unwrap();
        let mut base = valid_base_config();
        base.jwt.secret = "short".to_string();

        let err = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref field, .. } if field == "jwt.secret"));
    }

    #[test]
    fn test_load_reads_the_given_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
            [server]
            port = 4321

            [database]
            url = "postgres://localhost/from_file"
            "#,
        )
        .unwrap();

        let merger = ConfigurationMerger::load(Some(path.as_path()), Environment::Test).unwrap();
        assert_eq!(merger.config().database.url, "postgres://localhost/from_file");
        assert_eq!(merger.config().server.host, Settings::default().server.host);
    }
}
