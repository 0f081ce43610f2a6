//! Product handlers. Every route requires a bearer token.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{ErrorResponse, ProductRequest, ProductResponse, SearchParams};
use crate::api::middleware::auth_middleware;
use crate::error::AppResult;
use crate::models::ProductDetails;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn product_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_products, create_product))
        .routes(routes!(get_product_by_id))
        .routes(routes!(get_product_by_slug))
        .routes(routes!(list_products_by_category))
        .routes(routes!(update_product, delete_product))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

fn project(products: Vec<ProductDetails>) -> Vec<ProductResponse> {
    products.into_iter().map(Into::into).collect()
}

/// List products, optionally filtered by name, slug or description
#[utoipa::path(
    get,
    path = "/",
    tag = PRODUCT_TAG,
    params(SearchParams),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse]),
        (status = 404, description = "No product matched", body = ErrorResponse)
    )
)]
async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = match params.term() {
        Some(term) => state.services.products.search(&term).await?,
        None => state.services.products.list(None).await?,
    };
    Ok(Json(project(products)))
}

#[utoipa::path(
    get,
    path = "/id/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.get_by_id(id).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = PRODUCT_TAG,
    params(("slug" = String, Path, description = "Product slug")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn get_product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.get_by_slug(&slug).await?;
    Ok(Json(product.into()))
}

/// Products belonging to the category with this slug
#[utoipa::path(
    get,
    path = "/category/{slug}",
    tag = PRODUCT_TAG,
    params(("slug" = String, Path, description = "Category slug")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Products of the category", body = [ProductResponse]),
        (status = 404, description = "No product in that category", body = ErrorResponse)
    )
)]
async fn list_products_by_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.services.products.get_by_category_slug(&slug).await?;
    Ok(Json(project(products)))
}

#[utoipa::path(
    post,
    path = "/",
    tag = PRODUCT_TAG,
    request_body = ProductRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid body or slug already used", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    let product = state.services.products.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid body or slug already used", body = ErrorResponse),
        (status = 404, description = "Product or category not found", body = ErrorResponse)
    )
)]
async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    let product = state.services.products.update(id, payload.into()).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = PRODUCT_TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Product deleted", body = bool),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.services.products.delete(id).await?))
}
