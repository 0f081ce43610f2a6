//! Router configuration for the API.
//!
//! Route groups, the OpenAPI document and the middleware stack are all
//! assembled here.

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::ApiDoc;
use crate::api::handlers;
use crate::api::middleware::{
    REQUEST_ID_HEADER, global_error_handler, logging_middleware, request_id_middleware,
};
use crate::config::ServerConfig;
use crate::state::AppState;

/// `*` anywhere in the list allows every origin. Origins that are not valid
/// header values are skipped with a warning.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(3600))
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Layers run outermost first:
/// 1. CORS and compression
/// 2. Request ID, so everything below sees it
/// 3. Logging
/// 4. Error normalization into `ErrorResponse`
/// 5. Request timeout
///
/// Protected route groups add `auth_middleware` as a route layer.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let (router, openapi) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(handlers::health::health_routes())
        .nest("/auth", handlers::auth::auth_routes())
        .nest("/category", handlers::category::category_routes(state.clone()))
        .nest("/product", handlers::product::product_routes(state.clone()))
        .nest("/user", handlers::users::user_routes(state.clone()))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout)))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&server.cors_origins))
        .with_state(state)
}
