//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod category_service;
mod product_service;
mod user_service;

pub use auth_service::{AuthService, AuthSession, Registration};
pub use category_service::CategoryService;
pub use product_service::{ProductInput, ProductService};
pub use user_service::UserService;

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap; every service only holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub categories: CategoryService,
    pub products: ProductService,
    pub users: UserService,
}

impl Services {
    pub fn new(repos: Repositories, jwt: JwtConfig) -> Self {
        let categories = CategoryService::new(repos.categories);
        let products = ProductService::new(repos.products, categories.clone());
        Self {
            auth: AuthService::new(repos.users.clone(), jwt),
            users: UserService::new(repos.users, products.clone()),
            categories,
            products,
        }
    }
}
