//! HTTP handlers for authentication endpoints.
//!
//! Thin axum wrappers around [`AuthService`](crate::service::AuthService).
//! [`AuthError`](crate::AuthError) maps onto the shared
//! [`AppError`](eventtracker_web::AppError) response here.

pub mod extractor;
pub mod session;

pub use extractor::AuthUser;

use crate::error::AuthError;
use axum::http::StatusCode;
use eventtracker_web::AppError;
use eventtracker_web::error::INTERNAL_ERROR_MESSAGE;

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::Validation(message) => Self::validation(message),
            AuthError::EmailTaken => Self::conflict(message),
            // Login reports an unknown email as a client error, not a missing resource.
            AuthError::UserNotFound => Self::not_found_with_status(StatusCode::BAD_REQUEST, message),
            AuthError::InvalidCredentials => Self::invalid_credentials(message),
            AuthError::MissingToken => Self::unauthorized(message),
            AuthError::InvalidToken => Self::forbidden(message),
            AuthError::DatabaseError(_) | AuthError::InternalError(_) => {
                Self::internal(INTERNAL_ERROR_MESSAGE).with_source(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (AuthError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (AuthError::EmailTaken, StatusCode::BAD_REQUEST, "CONFLICT"),
            (AuthError::UserNotFound, StatusCode::BAD_REQUEST, "NOT_FOUND"),
            (AuthError::InvalidCredentials, StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AuthError::InvalidToken, StatusCode::FORBIDDEN, "FORBIDDEN"),
            (
                AuthError::DatabaseError("down".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
            ),
        ];

        for (err, status, code) in cases {
            let app_error = AppError::from(err);
            assert_eq!(app_error.status(), status);
            assert_eq!(app_error.code(), code);
        }
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let app_error = AppError::from(AuthError::DatabaseError("password=hunter2".into()));
        assert_eq!(app_error.message(), INTERNAL_ERROR_MESSAGE);
    }
}
