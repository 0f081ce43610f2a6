//! Category handlers. Every route requires a bearer token.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::CATEGORY_TAG;
use crate::api::dto::{CategoryRequest, CategoryResponse, ErrorResponse, SearchParams};
use crate::api::middleware::auth_middleware;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn category_routes(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_categories, create_category))
        .routes(routes!(get_category_by_id))
        .routes(routes!(get_category_by_slug))
        .routes(routes!(update_category, delete_category))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// List categories, optionally filtered by name or slug
#[utoipa::path(
    get,
    path = "/",
    tag = CATEGORY_TAG,
    params(SearchParams),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Matching categories", body = [CategoryResponse]),
        (status = 404, description = "No category matched", body = ErrorResponse)
    )
)]
async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<CategoryResponse>>> {
    let categories = state.services.categories.list(params.term()).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/id/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(category.into()))
}

#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = CATEGORY_TAG,
    params(("slug" = String, Path, description = "Category slug")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn get_category_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state.services.categories.get_by_slug(&slug).await?;
    Ok(Json(category.into()))
}

/// Create a category; the slug is derived from the name
#[utoipa::path(
    post,
    path = "/",
    tag = CATEGORY_TAG,
    request_body = CategoryRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid body or slug already used", body = ErrorResponse)
    )
)]
async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let category = state
        .services
        .categories
        .create(payload.name, payload.image)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    request_body = CategoryRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid body or slug already used", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let category = state
        .services
        .categories
        .update(id, payload.name, payload.image)
        .await?;
    Ok(Json(category.into()))
}

/// Delete a category
///
/// Fails with 400 while products still reference it.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = CATEGORY_TAG,
    params(("id" = Uuid, Path, description = "Category id")),
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Category deleted", body = bool),
        (status = 400, description = "Category still has products", body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.services.categories.delete(id).await?))
}
