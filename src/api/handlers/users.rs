//! User profile and favorite handlers.
//!
//! Reads are public; profile updates and favorite changes need a bearer
//! token.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    middleware,
};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use crate::api::doc::USER_TAG;
use crate::api::dto::{
    ErrorResponse, FavoriteRequest, SearchParams, UpdateUserRequest, UserDetailsResponse,
};
use crate::api::middleware::{AuthUser, auth_middleware};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

pub fn user_routes(state: AppState) -> OpenApiRouter<AppState> {
    let protected = OpenApiRouter::new()
        .routes(routes!(update_user))
        .routes(routes!(add_favorite, remove_favorite))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    OpenApiRouter::new()
        .routes(routes!(list_users))
        .routes(routes!(get_user_profile))
        .routes(routes!(get_user_by_nickname))
        .merge(protected)
}

/// List users, optionally filtered by first name, last name or nickname
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching users", body = [UserDetailsResponse]),
        (status = 404, description = "No user matched", body = ErrorResponse)
    )
)]
async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<UserDetailsResponse>>> {
    let users = state.services.users.list(params.term()).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/profile/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDetailsResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<UserDetailsResponse>> {
    let user = state.services.users.get_by_id(id).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    get,
    path = "/nickname/{nickname}",
    tag = USER_TAG,
    params(("nickname" = String, Path, description = "User nickname")),
    responses(
        (status = 200, description = "User found", body = UserDetailsResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn get_user_by_nickname(
    State(state): State<AppState>,
    Path(nickname): Path<String>,
) -> AppResult<Json<UserDetailsResponse>> {
    let user = state.services.users.get_by_nickname(&nickname).await?;
    Ok(Json(user.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "User updated", body = UserDetailsResponse),
        (status = 400, description = "Invalid body or nickname taken", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserDetailsResponse>> {
    tracing::info!(caller_id = %caller.user_id, user_id = %id, "Updating user profile");
    let user = state.services.users.update(id, payload.into()).await?;
    Ok(Json(user.into()))
}

/// Mark a product as favorite
#[utoipa::path(
    post,
    path = "/favorite",
    tag = USER_TAG,
    request_body = FavoriteRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Favorite added", body = UserDetailsResponse),
        (status = 404, description = "User or product not found", body = ErrorResponse)
    )
)]
async fn add_favorite(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FavoriteRequest>,
) -> AppResult<Json<UserDetailsResponse>> {
    let user = state.services.users.add_favorite(payload.into()).await?;
    Ok(Json(user.into()))
}

/// Unmark a favorite product; removing a missing edge still succeeds
#[utoipa::path(
    delete,
    path = "/favorite",
    tag = USER_TAG,
    request_body = FavoriteRequest,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Favorite removed", body = bool),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
async fn remove_favorite(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<FavoriteRequest>,
) -> AppResult<Json<bool>> {
    Ok(Json(state.services.users.remove_favorite(payload.into()).await?))
}
