//! Authentication-related Data Transfer Objects

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::UserResponse;
use crate::services::{AuthSession, Registration};
use crate::utils::jwt::TokenPair;

/// Login request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 25, message = "Password must be between 8 and 25 characters"))]
    #[schema(example = "correct-horse", format = "password", min_length = 8, max_length = 25)]
    pub password: String,
}

/// Register request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 20, message = "First name must be between 3 and 20 characters"))]
    #[schema(example = "Alice", min_length = 3, max_length = 20)]
    pub first_name: String,
    #[validate(length(min = 3, max = 20, message = "Last name must be between 3 and 20 characters"))]
    #[schema(example = "Walker", min_length = 3, max_length = 20)]
    pub last_name: String,
    /// Public handle, unique across users
    #[validate(length(min = 5, max = 15, message = "Nickname must be between 5 and 15 characters"))]
    #[schema(example = "alice_w", min_length = 5, max_length = 15)]
    pub nickname: String,
    /// Unique across users
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 25, message = "Password must be between 8 and 25 characters"))]
    #[schema(example = "correct-horse", format = "password", min_length = 8, max_length = 25)]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            nickname: request.nickname,
            email: request.email,
            password: request.password,
        }
    }
}

/// Refresh token request payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

/// Access/refresh token pair
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokensResponse {
    /// Expires after one hour
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub access_token: String,
    /// Expires after seven days
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGc...")]
    pub refresh_token: String,
}

impl From<TokenPair> for TokensResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

/// Returned by register and login
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            tokens: session.tokens.into(),
        }
    }
}
