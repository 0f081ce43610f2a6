//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations.

use crate::config::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// # Errors
    /// - `Configuration` when the database section is invalid
    /// - `Validation` for a zero rollback
    /// - `Database` when connecting or migrating fails
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;

        match (dry_run, rollback) {
            (true, _) => self.show_pending_migrations().await,
            (false, Some(steps)) => self.rollback_migrations(steps).await,
            (false, None) => self.run_migrations().await,
        }
    }

    async fn show_pending_migrations(&self) -> AppResult<()> {
        println!("Checking for pending migrations...");

        let pending = pending_migrations(&self.config.database.url).await?;
        if pending.is_empty() {
            println!("✓ No pending migrations - database is up to date");
        } else {
            println!("Found {} pending migration(s):", pending.len());
            for name in &pending {
                println!("  - {}", name);
            }
            println!("\nRun without --dry-run to apply them");
        }

        Ok(())
    }

    async fn run_migrations(&self) -> AppResult<()> {
        println!("Running database migrations...");

        let applied = run_pending_migrations(&self.config.database.url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }

        tracing::info!(applied = applied.len(), "Migrations applied");
        Ok(())
    }

    async fn rollback_migrations(&self, steps: u32) -> AppResult<()> {
        if steps == 0 {
            return Err(AppError::Validation {
                field: "rollback_steps".to_string(),
                reason: "Number of rollback steps must be greater than 0".to_string(),
            });
        }

        println!("Rolling back {} migration(s)...", steps);

        let reverted = revert_migrations(&self.config.database.url, steps).await?;
        if reverted.len() < steps as usize {
            println!(
                "Only {} migration(s) were applied; all of them have been reverted",
                reverted.len()
            );
        }
        println!("✓ Rolled back {} migration(s):", reverted.len());
        for version in &reverted {
            println!("  - {}", version);
        }

        tracing::info!(reverted = reverted.len(), "Migrations reverted");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/catalog".to_string();
        config
    }

    #[test]
    fn test_migrate_handler_new() {
        let config = valid_config();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_zero_rollback_steps_rejected_before_connecting() {
        let handler = MigrateCommandHandler::new(valid_config());

        let result = handler.execute(false, Some(0)).await;
        match result {
            Err(AppError::Validation { field, reason }) => {
                assert_eq!(field, "rollback_steps");
                assert!(reason.contains("greater than 0"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_database_url_rejected() {
        let mut config = valid_config();
        config.database.url = "mysql://localhost/catalog".to_string();

        let result = MigrateCommandHandler::new(config).execute(true, None).await;
        assert!(matches!(
            result,
            Err(AppError::Configuration { ref key, .. }) if key == "database.url"
        ));
    }
}
