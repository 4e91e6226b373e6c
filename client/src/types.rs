//! Wire types exchanged with the event tracker API.

use eventtracker_core::{AttendanceStatus, Event};
use serde::{Deserialize, Serialize};

/// `{message}` reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    /// Outcome message
    pub message: String,
}

/// The logged-in user as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: i64,
    /// Display name
    pub full_name: String,
    /// Email
    pub email: String,
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Outcome message
    pub message: String,
    /// Session token
    pub token: String,
    /// The logged-in user
    pub user: UserSummary,
}

/// Claims carried in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub id: i64,
    /// User email
    pub email: String,
    /// User display name
    pub full_name: String,
    /// Issued at (seconds since the epoch)
    pub iat: i64,
    /// Expires at (seconds since the epoch)
    pub exp: i64,
}

/// Reply to a comment, like or attendance update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventUpdate {
    /// Outcome message
    pub message: String,
    /// The event after the update
    pub event: Event,
}

/// New event fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateEvent {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Date, as entered
    pub date: String,
    /// Time, as entered
    pub time: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SignupBody<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub user: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct LikeBody {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AttendBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    pub status: AttendanceStatus,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}
