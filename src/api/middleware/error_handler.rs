//! Maps `AppError` onto HTTP responses and normalizes every error body to
//! `ErrorResponse`.

use axum::{
    Json,
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Error bodies larger than this are replaced rather than parsed
const MAX_ERROR_BODY: usize = 64 * 1024;

/// HTTP status for each error variant.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. }
        | AppError::ValidationErrors { .. }
        | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Body for error responses produced outside our handlers (axum's own
/// rejections and fallbacks).
fn fallback_error(status: StatusCode, body: &Bytes) -> ErrorResponse {
    let code = match status {
        StatusCode::BAD_REQUEST => "BAD_REQUEST",
        StatusCode::UNAUTHORIZED => "UNAUTHORIZED",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::METHOD_NOT_ALLOWED => "METHOD_NOT_ALLOWED",
        StatusCode::REQUEST_TIMEOUT => "REQUEST_TIMEOUT",
        StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
        StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
        StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
        StatusCode::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
        s if s.is_server_error() => "INTERNAL_SERVER_ERROR",
        _ => "UNKNOWN_ERROR",
    };

    let original = String::from_utf8_lossy(body).trim().to_string();
    let message = if original.is_empty() || status.is_server_error() {
        status
            .canonical_reason()
            .unwrap_or("An unknown error occurred")
            .to_string()
    } else {
        original
    };

    ErrorResponse::new(code, &message)
}

/// Rewrites every 4xx/5xx response into an `ErrorResponse` tagged with the
/// request id. JSON bodies that are not error bodies (such as the health
/// report) pass through untouched.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().map(|r| r.0.clone());
    let response = next.run(request).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, MAX_ERROR_BODY).await.unwrap_or_default();

    let mut error = if is_json(&parts.headers) {
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(error) => error,
            Err(_) => return Response::from_parts(parts, Body::from(bytes)),
        }
    } else {
        fallback_error(status, &bytes)
    };
    if error.request_id.is_none() {
        error.request_id = request_id;
    }

    let mut rewritten = (status, Json(error)).into_response();
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }
    rewritten
}
