//! User DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::ProductResponse;
use crate::models::{Favorite, UpdateUser, User, UserDetails};

/// Profile update payload; all three fields are replaced
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 20, message = "First name must be between 3 and 20 characters"))]
    #[schema(example = "Alice", min_length = 3, max_length = 20)]
    pub first_name: String,
    #[validate(length(min = 3, max = 20, message = "Last name must be between 3 and 20 characters"))]
    #[schema(example = "Walker", min_length = 3, max_length = 20)]
    pub last_name: String,
    #[validate(length(min = 5, max = 15, message = "Nickname must be between 5 and 15 characters"))]
    #[schema(example = "alice_w", min_length = 5, max_length = 15)]
    pub nickname: String,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            nickname: request.nickname,
        }
    }
}

/// Favorite add/remove payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub user_id: Uuid,
    pub product_id: Uuid,
}

impl From<FavoriteRequest> for Favorite {
    fn from(request: FavoriteRequest) -> Self {
        Self {
            user_id: request.user_id,
            product_id: request.product_id,
        }
    }
}

/// Public user projection (no password)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "Alice")]
    pub first_name: String,
    #[schema(example = "Walker")]
    pub last_name: String,
    #[schema(example = "alice_w")]
    pub nickname: String,
    pub avatar: Option<String>,
    #[schema(value_type = String, format = DateTime, example = "2025-01-01T12:00:00Z")]
    pub created_at: jiff::Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            nickname: user.nickname,
            avatar: user.avatar,
            created_at: user.created_at.to_jiff(),
        }
    }
}

/// User projection together with their favorite products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDetailsResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub favorites: Vec<ProductResponse>,
}

impl From<UserDetails> for UserDetailsResponse {
    fn from(details: UserDetails) -> Self {
        Self {
            user: details.user.into(),
            favorites: details.favorites.into_iter().map(Into::into).collect(),
        }
    }
}
