//! JWT authentication middleware.
//!
//! Validates the bearer access token and exposes the caller's id to
//! handlers.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::utils::jwt::{Claims, validate_access_token};

/// Authenticated caller, stored in request extensions.
///
/// Extract it in handlers with `Extension<AuthUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AppError;

    fn try_from(claims: Claims) -> AppResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
        })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` value.
fn bearer_token(value: &str) -> AppResult<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format. Expected: Bearer <token>")
        })
}

/// Rejects the request with 401 unless it carries a valid access token.
///
/// # Example
/// ```ignore
/// OpenApiRouter::new()
///     .routes(routes!(handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

    let token = bearer_token(auth_header)?;
    let claims = validate_access_token(token, &state.jwt_config.secret)?;

    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
