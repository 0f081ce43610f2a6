//! Authentication handlers for registration, login and token refresh.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AuthResponse, ErrorResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
    TokensResponse,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes
///
/// # Routes
/// - `POST /register` - Register a new user and get tokens
/// - `POST /login` - Authenticate and get tokens
/// - `POST /token` - Trade a refresh token for a new pair
pub fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(refresh_tokens))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid body or email already registered", body = ErrorResponse),
        (status = 409, description = "Nickname already taken", body = ErrorResponse)
    )
)]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let session = state.services.auth.register(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Invalid body or unknown email", body = ErrorResponse),
        (status = 401, description = "Wrong password", body = ErrorResponse)
    )
)]
async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .services
        .auth
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(session.into()))
}

/// Issue a new token pair from a refresh token
///
/// The presented refresh token is not revoked.
#[utoipa::path(
    post,
    path = "/token",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = TokensResponse),
        (status = 401, description = "Invalid or expired refresh token", body = ErrorResponse),
        (status = 404, description = "Token subject no longer exists", body = ErrorResponse)
    )
)]
async fn refresh_tokens(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<TokensResponse>> {
    let tokens = state.services.auth.refresh(&payload.refresh_token).await?;
    Ok(Json(tokens.into()))
}
