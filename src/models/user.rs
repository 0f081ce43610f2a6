use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use super::ProductDetails;

/// User row
#[derive(Debug, Queryable, Selectable, Identifiable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Argon2 PHC string, never serialized
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
    pub avatar: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
}

/// Profile update; all three fields are always written
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub first_name: String,
    pub last_name: String,
    pub nickname: String,
}

/// Favorite edge between a user and a product
#[derive(Debug, Queryable, Selectable, Insertable, Clone, Copy, PartialEq, Eq, Hash)]
#[diesel(table_name = crate::schema::favorites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Favorite {
    pub user_id: Uuid,
    pub product_id: Uuid,
}

/// User together with the products they marked as favorite
#[derive(Debug, Clone)]
pub struct UserDetails {
    pub user: User,
    pub favorites: Vec<ProductDetails>,
}
