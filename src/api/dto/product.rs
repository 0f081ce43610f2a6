//! Product DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::CategoryResponse;
use crate::models::ProductDetails;
use crate::services::ProductInput;

/// Create/update payload
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[validate(length(min = 3, max = 20, message = "Name must be between 3 and 20 characters"))]
    #[schema(example = "Cola", min_length = 3, max_length = 20)]
    pub name: String,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    #[schema(example = "Sparkling soft drink")]
    pub description: String,
    pub image: Option<String>,
    pub category_id: Uuid,
    pub is_available: bool,
    /// Minor currency unit
    #[validate(range(min = 0, message = "Price cannot be negative"))]
    #[schema(example = 150, minimum = 0)]
    pub price: i32,
}

impl From<ProductRequest> for ProductInput {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            image: request.image,
            price: request.price,
            is_available: request.is_available,
            category_id: request.category_id,
        }
    }
}

/// Public product projection; price and description stay internal
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    #[schema(example = "Cola")]
    pub name: String,
    #[schema(example = "cola")]
    pub slug: String,
    pub image: Option<String>,
    pub is_available: bool,
    pub category: CategoryResponse,
}

impl From<ProductDetails> for ProductResponse {
    fn from(details: ProductDetails) -> Self {
        let ProductDetails { product, category } = details;
        Self {
            id: product.id,
            name: product.name,
            slug: product.slug,
            image: product.image,
            is_available: product.is_available,
            category: category.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Product};

    #[test]
    fn test_product_request_rules() {
        let request: ProductRequest = serde_json::from_value(serde_json::json!({
            "name": "Cola",
            "description": "",
            "categoryId": Uuid::new_v4(),
            "isAvailable": true,
            "price": -1,
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("price"));
        assert!(request.image.is_none());
    }

    #[test]
    fn test_product_request_requires_uuid_category() {
        let parsed = serde_json::from_value::<ProductRequest>(serde_json::json!({
            "name": "Cola",
            "description": "fizzy",
            "categoryId": "drinks",
            "isAvailable": true,
            "price": 150,
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_projection_hides_price_and_description() {
        let category_id = Uuid::new_v4();
        let details = ProductDetails {
            product: Product {
                id: Uuid::new_v4(),
                name: "Cola".to_string(),
                slug: "cola".to_string(),
                description: "fizzy".to_string(),
                image: None,
                price: 150,
                is_available: true,
                category_id,
            },
            category: Category {
                id: category_id,
                name: "Drinks".to_string(),
                slug: "drinks".to_string(),
                image: None,
            },
        };

        let body = serde_json::to_value(ProductResponse::from(details)).unwrap();
        assert_eq!(body["isAvailable"], true);
        assert_eq!(body["category"]["slug"], "drinks");
        assert!(body.get("price").is_none());
        assert!(body.get("description").is_none());
    }
}
