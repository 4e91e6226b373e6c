//! Fast password hasher for tests.

use crate::error::Result;
use crate::password::PasswordHasher;

/// Prefixes the password instead of hashing it. Never use outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextHasher;

const PREFIX: &str = "plain$";

impl PasswordHasher for PlaintextHasher {
    fn hash(&self, password: &str) -> Result<String> {
        Ok(format!("{PREFIX}{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        Ok(hash.strip_prefix(PREFIX) == Some(password))
    }
}
