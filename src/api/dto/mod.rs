//! Data Transfer Objects for API requests and responses.
//!
//! Request DTOs carry `validator` rules and are extracted through
//! `ValidatedJson`; response DTOs are explicit projections of the models.

mod auth;
mod category;
mod error;
mod product;
mod user;

pub use auth::{AuthResponse, LoginRequest, RefreshTokenRequest, RegisterRequest, TokensResponse};
pub use category::{CategoryRequest, CategoryResponse, SearchParams};
pub use error::ErrorResponse;
pub use product::{ProductRequest, ProductResponse};
pub use user::{FavoriteRequest, UpdateUserRequest, UserDetailsResponse, UserResponse};
