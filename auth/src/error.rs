//! Error types for authentication operations.

use eventtracker_core::ValidationError;
use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Error taxonomy for sign-up, login and token checks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    // ═══════════════════════════════════════════════════════════
    // Input Errors
    // ═══════════════════════════════════════════════════════════
    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Sign-up with an email that is already registered.
    #[error("Email already exists")]
    EmailTaken,

    // ═══════════════════════════════════════════════════════════
    // Authentication Errors
    // ═══════════════════════════════════════════════════════════
    /// No user has the given email.
    #[error("User not found")]
    UserNotFound,

    /// The password does not match the stored hash.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token was supplied.
    #[error("Access denied. No token provided")]
    MissingToken,

    /// The token is malformed, forged or expired.
    #[error("Invalid or expired token")]
    InvalidToken,

    // ═══════════════════════════════════════════════════════════
    // System Errors
    // ═══════════════════════════════════════════════════════════
    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Hashing, signing or task failure (not exposed to users).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ValidationError> for AuthError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_preserved() {
        let err = AuthError::from(ValidationError::new("All fields are required"));
        assert_eq!(err.to_string(), "All fields are required");
    }
}
