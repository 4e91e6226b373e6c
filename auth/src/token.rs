//! JWT issuance and verification.
//!
//! Tokens are HS256-signed and carry `{id, email, full_name, iat, exp}`.
//! Expiry is checked against the injected [`Clock`] with zero leeway, so a
//! token is rejected from the second `exp` is reached.
//!
//! # Example
//!
//! ```
//! use eventtracker_auth::providers::User;
//! use eventtracker_auth::token::TokenIssuer;
//! use eventtracker_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! let issuer = TokenIssuer::new(b"secret", chrono::Duration::hours(1), Arc::new(SystemClock));
//! let user = User {
//!     id: 7,
//!     full_name: "Ada Lovelace".into(),
//!     email: "ada@example.com".into(),
//!     password_hash: String::new(),
//!     created_at: chrono::Utc::now(),
//! };
//!
//! let (token, claims) = issuer.issue(&user).unwrap();
//! assert_eq!(claims.exp - claims.iat, 3600);
//! assert_eq!(issuer.verify(&token).unwrap().email, "ada@example.com");
//! ```

use crate::error::{AuthError, Result};
use crate::providers::User;
use chrono::Duration;
use eventtracker_core::environment::Clock;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub id: i64,
    /// User email.
    pub email: String,
    /// User display name.
    pub full_name: String,
    /// Issued at (seconds since the epoch).
    pub iat: i64,
    /// Expires at (seconds since the epoch).
    pub exp: i64,
}

impl Claims {
    /// Whether the token has expired at `now` (seconds since the epoch).
    #[must_use]
    pub const fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Signs and verifies session tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create an issuer for `secret` with the given token lifetime.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            clock,
        }
    }

    /// Issue a token for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InternalError`] if the expiry is out of range or
    /// signing fails.
    pub fn issue(&self, user: &User) -> Result<(String, Claims)> {
        let now = self.clock.now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            AuthError::InternalError("Token expiry out of range".to_string())
        })?;
        let claims = Claims {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(format!("Token signing failed: {e}")))?;
        Ok((token, claims))
    }

    /// Verify a token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] if the token is malformed, signed
    /// with another key, or expired.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                AuthError::InvalidToken
            })?;

        if claims.is_expired_at(self.clock.now().timestamp()) {
            tracing::debug!(user_id = claims.id, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
