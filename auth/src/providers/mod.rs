//! Authentication providers.
//!
//! Traits for the external dependencies of the auth flows. The service
//! depends on these traits; the server wires in PostgreSQL and tests wire in
//! the in-memory mocks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod user;

pub use user::{UserFuture, UserRepository};

/// A registered user.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    /// Auto-incremented id.
    pub id: i64,
    /// Display name.
    pub full_name: String,
    /// Unique email.
    pub email: String,
    /// bcrypt hash of the password. Never serialized.
    pub password_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Public view of this user.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            full_name: self.full_name.clone(),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A user to be inserted. The password is already hashed.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub full_name: String,
    /// Unique email.
    pub email: String,
    /// bcrypt hash of the password.
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

/// The user fields returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: i64,
    /// Display name.
    pub full_name: String,
    /// Email.
    pub email: String,
}
