//! Configuration management for catalog-rs
//!
//! Layered loading, lowest to highest priority:
//! 1. `default.toml` - base configuration (required)
//! 2. `{environment}.toml` - environment overlay
//! 3. `local.toml` - untracked local overrides
//! 4. `CATALOG_*` environment variables (`CATALOG_JWT__SECRET` -> `jwt.secret`)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{
    ApplicationConfig, DatabaseConfig, JwtConfig, LoggerSettings, ServerConfig, Settings,
};
