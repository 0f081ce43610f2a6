use diesel::prelude::*;
use uuid::Uuid;

use super::Category;

#[derive(Debug, Queryable, Selectable, Identifiable, Associations, Clone, PartialEq, Eq)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    /// Minor currency unit
    pub price: i32,
    pub is_available: bool,
    pub category_id: Uuid,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image: Option<String>,
    pub price: i32,
    pub is_available: bool,
    pub category_id: Uuid,
}

/// `slug` and `image` are skipped when `None`
#[derive(Debug, AsChangeset, Clone)]
#[diesel(table_name = crate::schema::products)]
pub struct UpdateProduct {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub image: Option<String>,
    pub price: i32,
    pub is_available: bool,
    pub category_id: Uuid,
}

/// Product joined with its owning category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetails {
    pub product: Product,
    pub category: Category,
}
