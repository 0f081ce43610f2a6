//! Serve command handler
//!
//! Starts the HTTP server, or with `--dry-run` only reports what it would do.

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Run the server until shutdown, or print a summary when `dry_run` is set
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            self.validate_only()?;
            return Ok(());
        }

        Server::new(self.config, self.environment).run().await
    }

    /// Validate configuration without binding or touching the database
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({})", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Request timeout: {}s, CORS origins: {}",
            self.config.server.request_timeout,
            self.config.server.cors_origins.join(", ")
        );
        println!(
            "✓ Database pool: {}-{} connections, auto-migrate: {}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            self.config.database.auto_migrate
        );
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
