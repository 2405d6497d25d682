//! `AppError` and its JSON rendering

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Every handler failure ends up here. It renders as
/// `{code, message, details?}` with the status taken from the code.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
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

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a "required field" validation error for `field`
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{} is required", field))
            .with_detail("field", field)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a permission denied error
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, msg)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Create a token expired error
    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Create an invalid credentials error
    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }
}

/// JSON body of every error response: `{code, message, details?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
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
        let body = ErrorBody::from(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new_uses_default_message() {
        let err = AppError::new(ErrorCode::LunchTimeAlreadyAssigned);
        assert_eq!(err.code, ErrorCode::LunchTimeAlreadyAssigned);
        assert_eq!(err.message, "Lunch time already assigned to this employee");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Missing required fields")
            .with_detail("field", "email")
            .with_detail("reason", "required");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "email");
        assert_eq!(details.get("reason").unwrap(), "required");
    }

    #[test]
    fn test_required_field() {
        let err = AppError::required("title");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "title is required");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::forbidden("no").code, ErrorCode::PermissionDenied);
        assert_eq!(AppError::conflict("dup").http_status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::invalid_credentials().http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::database("boom").code, ErrorCode::DatabaseError);
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::TaskNotFound, "Task not found");
        assert_eq!(format!("{}", err), "Task not found");
    }

    #[test]
    fn test_error_body_from_error() {
        let err = AppError::with_message(ErrorCode::EmployeeNotFound, "Employee not found")
            .with_detail("id", "employee:abc");
        let body = ErrorBody::from(&err);

        assert_eq!(body.code, 3001);
        assert_eq!(body.message, "Employee not found");
        assert_eq!(body.details.unwrap()["id"], "employee:abc");
    }

    #[test]
    fn test_error_body_skips_empty_details() {
        let json = serde_json::to_string(&ErrorBody::from(&AppError::not_authenticated())).unwrap();
        assert_eq!(json, r#"{"code":1001,"message":"User is not authenticated"}"#);
    }

    #[tokio::test]
    async fn test_into_response_status_and_body() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::required("email").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, 7);
        assert_eq!(body.message, "email is required");
    }
}
