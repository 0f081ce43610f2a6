//! Error response DTOs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::error::AppError;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "code": "NOT_FOUND",
    "message": "Product not found: slug=cola",
    "details": { "entity": "Product", "field": "slug", "value": "cola" },
    "requestId": "0f6b7c1e-8a57-4b8e-9d0e-2c5f4ad3f1b2"
}))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}

impl From<&AppError> for ErrorResponse {
    /// Sources are never copied into the body; only the variant's own
    /// fields are exposed.
    fn from(error: &AppError) -> Self {
        match error {
            AppError::NotFound { entity, field, value } => {
                ErrorResponse::new("NOT_FOUND", &error.to_string()).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                }))
            }
            AppError::Duplicate { entity, field, value } => {
                ErrorResponse::new("DUPLICATE_ENTRY", &error.to_string()).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                }))
            }
            AppError::Validation { field, reason } => {
                ErrorResponse::new("VALIDATION_ERROR", &error.to_string()).with_details(json!({
                    "field": field,
                    "reason": reason,
                }))
            }
            AppError::ValidationErrors { errors } => {
                ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                    .with_details(json!({ "errors": errors }))
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Unauthorized { message } => ErrorResponse::new("UNAUTHORIZED", message),
            AppError::Database { operation, .. } => {
                ErrorResponse::new("DATABASE_ERROR", &error.to_string())
                    .with_details(json!({ "operation": operation }))
            }
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", &error.to_string())
                    .with_details(json!({ "key": key }))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    #[test]
    fn test_serializes_camel_case_and_skips_empty() {
        let body = serde_json::to_value(
            ErrorResponse::new("BAD_REQUEST", "Email already exist").with_request_id("req-1"),
        )
        .unwrap();

        assert_eq!(
            body,
            json!({ "code": "BAD_REQUEST", "message": "Email already exist", "requestId": "req-1" })
        );
    }

    #[test]
    fn test_not_found_details() {
        let response = ErrorResponse::from(&AppError::not_found("Category", "slug", "drinks"));

        assert_eq!(response.code, "NOT_FOUND");
        assert_eq!(response.message, "Category not found: slug=drinks");
        assert_eq!(response.details.unwrap()["value"], "drinks");
    }

    #[test]
    fn test_validation_errors_listed() {
        let response = ErrorResponse::from(&AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }],
        });

        let details = response.details.unwrap();
        assert_eq!(details["errors"][0]["field"], "email");
        assert_eq!(details["errors"][0]["message"], "Invalid email format");
    }

    #[test]
    fn test_internal_source_is_hidden() {
        let response = ErrorResponse::from(&AppError::Internal {
            source: anyhow::anyhow!("password hash column is corrupt"),
        });

        assert_eq!(response.message, "An internal error occurred");
        assert!(response.details.is_none());
    }
}
