//! Dispatches a parsed command to its handler.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::{Environment, Settings};

/// Run the command in `cli`; no subcommand means `serve`.
pub async fn execute_command(
    cli: &Cli,
    settings: Settings,
    environment: Environment,
) -> anyhow::Result<()> {
    let default_command = Commands::default();
    let command = cli.command.as_ref().unwrap_or(&default_command);

    tracing::debug!(?command, %environment, "Executing command");

    match command {
        Commands::Serve { dry_run, .. } => {
            ServeCommandHandler::new(settings, environment)
                .execute(*dry_run)
                .await
        }
        Commands::Migrate { dry_run, rollback } => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(())
        }
    }
}
