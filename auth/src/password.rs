//! Password hashing.
//!
//! Hashing is CPU-bound; callers on the async runtime run it through
//! `tokio::task::spawn_blocking` (see [`AuthService`](crate::service::AuthService)).

use crate::error::{AuthError, Result};

/// One-way password hashing.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InternalError`] if hashing fails.
    fn hash(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InternalError`] if the stored hash is malformed.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// bcrypt hasher with a configurable cost factor.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    /// Create a hasher with the given cost factor.
    #[must_use]
    pub const fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// The configured cost factor.
    #[must_use]
    pub const fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::InternalError(format!("Password hashing failed: {e}")))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash)
            .map_err(|e| AuthError::InternalError(format!("Password verification failed: {e}")))
    }
}
