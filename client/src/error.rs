//! Error types for the event tracker client

use thiserror::Error;

/// Message shown when the server's reply cannot be read.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur when talking to the event tracker API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the server, or [`FALLBACK_ERROR_MESSAGE`]
        message: String,
    },

    /// A success response did not match the expected shape
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// A protected operation was attempted without a session
    #[error("Not logged in")]
    NotLoggedIn,

    /// Reading or writing the stored token failed
    #[error("Token store error: {0}")]
    TokenStore(String),
}

impl ClientError {
    /// HTTP status for API errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user.
    ///
    /// The server's message for API errors; transport and parse failures get
    /// [`FALLBACK_ERROR_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Network(_) | Self::ResponseParseFailed(_) => FALLBACK_ERROR_MESSAGE.to_string(),
            Self::NotLoggedIn | Self::TokenStore(_) => self.to_string(),
        }
    }

    /// Whether the server rejected the session token (401 or 403).
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
