//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use crate::config::JwtConfig;
use crate::db::AsyncDbPool;
use crate::repositories::Repositories;
use crate::services::Services;

/// Shared request state. Cloning is cheap; everything inside is `Arc`-backed.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    /// Pool used by the health checks; absent when the repositories are not
    /// database-backed
    pub db_pool: Option<AsyncDbPool>,
    /// Secret and lifetimes used to verify bearer tokens
    pub jwt_config: JwtConfig,
}

impl AppState {
    /// Builds PostgreSQL-backed repositories and services on `pool`.
    ///
    /// # Example
    /// ```ignore
    /// let pool = establish_async_connection_pool(&settings.database).await?;
    /// let state = AppState::new(pool, settings.jwt.clone());
    /// ```
    pub fn new(pool: AsyncDbPool, jwt_config: JwtConfig) -> Self {
        let mut state = Self::from_repositories(Repositories::new(pool.clone()), jwt_config);
        state.db_pool = Some(pool);
        state
    }

    pub fn from_repositories(repos: Repositories, jwt_config: JwtConfig) -> Self {
        Self {
            services: Services::new(repos, jwt_config.clone()),
            db_pool: None,
            jwt_config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// State over an in-memory store with a fixed test secret
    pub(crate) fn test(store: crate::repositories::memory::MemoryStore) -> Self {
        Self::from_repositories(
            store.repositories(),
            JwtConfig {
                secret: "test-secret-key-that-is-at-least-32-chars".to_string(),
                access_token_expiration: 1,
                refresh_token_expiration: 168,
            },
        )
    }
}
