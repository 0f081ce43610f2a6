use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const AUTH_TAG: &str = "Auth";
pub const CATEGORY_TAG: &str = "Category";
pub const PRODUCT_TAG: &str = "Product";
pub const USER_TAG: &str = "User";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog",
        description = "Catalog API: products, categories, users and favorites",
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Registration, login and token refresh"),
        (name = CATEGORY_TAG, description = "Category management"),
        (name = PRODUCT_TAG, description = "Product management"),
        (name = USER_TAG, description = "User profiles and favorites"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /auth/login or /auth/register"))
                        .build(),
                ),
            )
        }
    }
}
