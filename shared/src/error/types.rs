//! Error types and the wire-level error body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type for the platform, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (field-level validation errors)
/// - Optional list of missing mandatory fields
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Mandatory fields absent from the request, reported all at once
    pub missing_fields: Option<Vec<String>>,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            missing_fields: None,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            missing_fields: None,
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the detail map wholesale
    pub fn with_details(mut self, details: HashMap<String, Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Attach the list of missing mandatory fields
    pub fn with_missing_fields(mut self, fields: Vec<String>) -> Self {
        self.missing_fields = Some(fields);
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    /// Create a conflict error
    pub fn conflict(code: ErrorCode) -> Self {
        debug_assert_eq!(code.http_status(), StatusCode::CONFLICT);
        Self::new(code)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a session expired error
    pub fn session_expired() -> Self {
        Self::new(ErrorCode::SessionExpired)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Wire-level error body
///
/// Every error response is a JSON object with an `error` summary plus an
/// optional `missingFields` list or `details` map:
///
/// ```json
/// {"error": "Required profile fields are missing", "missingFields": ["name", "storeContact"]}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable error summary
    pub error: String,
    /// Mandatory fields missing from the request (present on field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_fields: Option<Vec<String>>,
    /// Field-level errors keyed by dotted path (present on validation errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ErrorBody {
    /// Build the wire body for an error
    pub fn from_error(err: &AppError) -> Self {
        Self {
            error: err.message.clone(),
            missing_fields: err.missing_fields.clone(),
            details: err.details.clone(),
        }
    }
}

impl From<AppError> for ErrorBody {
    fn from(err: AppError) -> Self {
        Self {
            error: err.message,
            missing_fields: err.missing_fields,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        let body = ErrorBody::from(self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::ProfileNotFound);
        assert_eq!(err.code, ErrorCode::ProfileNotFound);
        assert_eq!(err.message, "Profile not found");
        assert!(err.missing_fields.is_none());
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid date format");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid date format");
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Receipt validation failed")
            .with_detail("items.0.quantity", "Quantity must be at least 1")
            .with_detail("customerName", "Customer name is required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(
            details.get("items.0.quantity").unwrap(),
            "Quantity must be at least 1"
        );
        assert_eq!(
            details.get("customerName").unwrap(),
            "Customer name is required"
        );
    }

    #[test]
    fn test_app_error_with_missing_fields() {
        let err = AppError::new(ErrorCode::MissingRequiredFields)
            .with_missing_fields(vec!["name".to_string(), "storeContact".to_string()]);

        assert_eq!(err.code, ErrorCode::MissingRequiredFields);
        assert_eq!(
            err.missing_fields,
            Some(vec!["name".to_string(), "storeContact".to_string()])
        );
    }

    #[test]
    fn test_app_error_http_status() {
        assert_eq!(
            AppError::new(ErrorCode::ProfileNotFound).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::new(ErrorCode::NotAuthenticated).http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::new(ErrorCode::StoreContactTaken).http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::new(ErrorCode::DatabaseError).http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Receipt not found");
        assert_eq!(format!("{}", err), "Receipt not found");
    }

    #[test]
    fn test_error_body_minimal() {
        let err = AppError::new(ErrorCode::ProfileNotFound);
        let body = ErrorBody::from_error(&err);
        let json = serde_json::to_string(&body).unwrap();
        // Absent optionals must not appear on the wire
        assert_eq!(json, r#"{"error":"Profile not found"}"#);
    }

    #[test]
    fn test_error_body_missing_fields_camel_case() {
        let err = AppError::new(ErrorCode::MissingRequiredFields)
            .with_missing_fields(vec!["storeName".to_string()]);
        let json = serde_json::to_string(&ErrorBody::from_error(&err)).unwrap();
        assert!(json.contains("\"missingFields\":[\"storeName\"]"));
        assert!(!json.contains("missing_fields"));
        assert!(!json.contains("\"details\""));
    }

    #[test]
    fn test_error_body_details() {
        let err = AppError::validation("Receipt validation failed")
            .with_detail("items.0.price", "Price must be at least 0.01");
        let body = ErrorBody::from_error(&err);
        assert_eq!(body.error, "Receipt validation failed");
        let details = body.details.unwrap();
        assert_eq!(
            details.get("items.0.price").unwrap(),
            "Price must be at least 0.01"
        );
    }
}
