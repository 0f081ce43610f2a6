//! Category DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::Category;

/// Create/update payload; the slug is always derived from `name`
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 3, max = 20, message = "Name must be between 3 and 20 characters"))]
    #[schema(example = "Fresh Fruits", min_length = 3, max_length = 20)]
    pub name: String,
    #[schema(example = "https://cdn.example.com/fruits.png")]
    pub image: Option<String>,
}

/// `?search=` filter shared by the list endpoints
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive substring to match
    pub search: Option<String>,
}

impl SearchParams {
    /// An empty term means "no filter"; anything else is matched verbatim
    pub fn term(self) -> Option<String> {
        self.search.filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[schema(example = "Fresh Fruits")]
    pub name: String,
    #[schema(example = "fresh-fruits")]
    pub slug: String,
    pub image: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            image: category.image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_empty_is_none() {
        let params = |s: Option<&str>| SearchParams {
            search: s.map(String::from),
        };

        assert_eq!(params(None).term(), None);
        assert_eq!(params(Some("")).term(), None);
        assert_eq!(params(Some("   ")).term(), Some("   ".to_string()));
        assert_eq!(params(Some(" fruit ")).term(), Some(" fruit ".to_string()));
    }

    #[test]
    fn test_category_request_name_length() {
        let request = CategoryRequest {
            name: "ab".to_string(),
            image: None,
        };
        assert!(request.validate().is_err());

        let request = CategoryRequest {
            name: "Drinks".to_string(),
            image: None,
        };
        assert!(request.validate().is_ok());
    }
}
