//! Embedded Diesel migrations.
//!
//! `diesel_migrations` only drives synchronous connections, so every call
//! opens a short-lived `PgConnection` on the blocking thread pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::error::{AppError, AppResult};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Names of migrations not yet applied
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "check pending migrations", |conn| {
        conn.pending_migrations(MIGRATIONS)
            .map(|pending| pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Apply all pending migrations, returning the applied versions
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    with_connection(database_url, "run pending migrations", |conn| {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| applied.iter().map(|v| v.to_string()).collect())
    })
    .await
}

/// Revert the last `steps` migrations, newest first
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    with_connection(database_url, "revert migrations", move |conn| {
        let mut reverted = Vec::new();
        for _ in 0..steps {
            if conn.applied_migrations()?.is_empty() {
                break;
            }
            reverted.push(conn.revert_last_migration(MIGRATIONS)?.to_string());
        }
        Ok(reverted)
    })
    .await
}

type MigrationResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

async fn with_connection<T, F>(database_url: &str, operation: &'static str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> MigrationResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();

    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: format!("establish connection to {}", operation),
            source: anyhow::Error::from(e),
        })?;

        f(&mut conn).map_err(|e| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("Migration error: {}", e),
        })
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}
