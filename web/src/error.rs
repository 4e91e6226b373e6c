//! Error types for web handlers.
//!
//! This module defines the error type that bridges domain errors and HTTP
//! responses, implementing Axum's `IntoResponse` trait.
//!
//! | Constructor | Status | Code |
//! |---|---|---|
//! | [`AppError::validation`] | 400 | `VALIDATION_ERROR` |
//! | [`AppError::conflict`] | 400 | `CONFLICT` |
//! | [`AppError::invalid_credentials`] | 400 | `INVALID_CREDENTIALS` |
//! | [`AppError::unauthorized`] | 401 | `UNAUTHORIZED` |
//! | [`AppError::forbidden`] | 403 | `FORBIDDEN` |
//! | [`AppError::not_found`] | 404 | `NOT_FOUND` |
//! | [`AppError::internal`] | 500 | `INTERNAL_SERVER_ERROR` |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventtracker_core::{StoreError, ValidationError};
use serde::Serialize;
use std::fmt;

/// Message shown to clients for any server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Message for an event id that matches no document.
pub const EVENT_NOT_FOUND_MESSAGE: &str = "Event not found";

/// Application error type for web handlers.
///
/// Wraps domain errors and renders HTTP-friendly error responses. The
/// optional `source` is logged for 5xx responses and never sent to clients.
///
/// # Examples
///
/// ```ignore
/// async fn handler() -> Result<Json<Event>, AppError> {
///     let event = repository.get_event(id).await?;
///     Ok(Json(event))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a 400 error for missing or malformed input.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "VALIDATION_ERROR".to_string(),
        )
    }

    /// Create a 400 error for a duplicate unique key.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "CONFLICT".to_string(),
        )
    }

    /// Create a 400 error for a failed login.
    #[must_use]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "INVALID_CREDENTIALS".to_string(),
        )
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            message.into(),
            "UNAUTHORIZED".to_string(),
        )
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            message.into(),
            "FORBIDDEN".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            message.into(),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 404 Not Found error with a caller-chosen status.
    ///
    /// Login reports an unknown email as 400 while events use 404.
    #[must_use]
    pub fn not_found_with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, message.into(), "NOT_FOUND".to_string())
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(INTERNAL_ERROR_MESSAGE).with_source(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::validation(err.0)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::not_found(EVENT_NOT_FOUND_MESSAGE),
            other => Self::internal(INTERNAL_ERROR_MESSAGE).with_source(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventtracker_core::EventId;

    #[test]
    fn test_error_display() {
        let err = AppError::validation("All fields are required");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] All fields are required");
    }

    #[test]
    fn test_validation_is_bad_request() {
        let err = AppError::from(ValidationError::new("Email and password are required"));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_conflict_is_bad_request() {
        let err = AppError::conflict("Email already exists");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "CONFLICT");
    }

    #[test]
    fn test_store_not_found() {
        let err = AppError::from(StoreError::NotFound(EventId::new()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Event not found");
    }

    #[test]
    fn test_store_failure_hides_detail() {
        let err = AppError::from(StoreError::Database("connection refused".to_string()));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, INTERNAL_ERROR_MESSAGE);
        assert!(std::error::Error::source(&err).is_some());
    }
}
