//! Repository layer for data access operations.
//!
//! Each entity has an `async_trait` repository trait with a Diesel
//! implementation; services only see the trait objects.

mod category_repo;
#[cfg(test)]
pub(crate) mod memory;
mod product_repo;
mod user_repo;

use std::sync::Arc;

pub use category_repo::{CategoryRepository, PgCategoryRepository};
pub use product_repo::{PgProductRepository, ProductRepository};
pub use user_repo::{PgUserRepository, UserRepository};

#[cfg(test)]
pub use category_repo::MockCategoryRepository;
#[cfg(test)]
pub use product_repo::MockProductRepository;
#[cfg(test)]
pub use user_repo::MockUserRepository;

use crate::db::AsyncDbPool;

/// All repositories, shared by the services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool)),
        }
    }
}

/// `%term%` pattern for `ILIKE`, with LIKE metacharacters escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("fruit"), "%fruit%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
