//! Stored-session handling.
//!
//! The client never verifies token signatures. It only reads the payload to
//! learn who is logged in and when the token stops working, so an expired
//! token can be discarded without a server round trip.

use crate::error::ClientError;
use crate::token_store::TokenStore;
use crate::types::TokenClaims;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use eventtracker_core::environment::Clock;
use std::sync::Arc;

/// Read the claims of a JWT without checking its signature.
///
/// Returns `None` for anything that is not three dot-separated segments with
/// a base64url JSON payload.
#[must_use]
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Which view the client should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Login / signup panels
    LoggedOut,
    /// Event feed
    LoggedIn {
        /// Raw bearer token
        token: String,
        /// Decoded token payload
        claims: TokenClaims,
    },
}

impl SessionState {
    /// Bearer token for the protected view.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        match self {
            Self::LoggedIn { token, .. } => Some(token),
            Self::LoggedOut => None,
        }
    }

    /// Claims of the logged-in user.
    #[must_use]
    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            Self::LoggedIn { claims, .. } => Some(claims),
            Self::LoggedOut => None,
        }
    }
}

/// Token persistence plus the local expiry check.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Create a session over `store`, judging expiry by `clock`.
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Pick up the stored token, if it is still usable.
    ///
    /// Missing, undecodable or expired tokens are cleared and yield
    /// [`SessionState::LoggedOut`]. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStore`] if the store fails.
    pub fn restore(&self) -> Result<SessionState, ClientError> {
        let Some(token) = self.store.load()? else {
            return Ok(SessionState::LoggedOut);
        };

        match decode_claims(&token) {
            Some(claims) if !self.is_expired(&claims) => Ok(SessionState::LoggedIn { token, claims }),
            Some(claims) => {
                tracing::debug!(exp = claims.exp, "Stored token expired");
                self.end()?;
                Ok(SessionState::LoggedOut)
            }
            None => {
                tracing::debug!("Stored token unreadable");
                self.end()?;
                Ok(SessionState::LoggedOut)
            }
        }
    }

    /// Store a freshly issued token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ResponseParseFailed`] if the token has no
    /// readable payload, or [`ClientError::TokenStore`] if saving fails.
    pub fn start(&self, token: String) -> Result<SessionState, ClientError> {
        let claims = decode_claims(&token).ok_or_else(|| {
            ClientError::ResponseParseFailed("login returned an unreadable token".to_string())
        })?;
        self.store.save(&token)?;
        Ok(SessionState::LoggedIn { token, claims })
    }

    /// Forget the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::TokenStore`] if the store fails.
    pub fn end(&self) -> Result<(), ClientError> {
        self.store.clear()
    }

    fn is_expired(&self, claims: &TokenClaims) -> bool {
        self.clock.now().timestamp() >= claims.exp
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;
    use eventtracker_testing::{FixedClock, test_clock};

    fn token_with(claims: &serde_json::Value) -> String {
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("eyJhbGciOiJIUzI1NiJ9.{payload}.c2ln")
    }

    fn claims_expiring_at(exp: i64) -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "email": "ada@example.com",
            "full_name": "Ada",
            "iat": exp - 3600,
            "exp": exp,
        })
    }

    fn session(store: &MemoryTokenStore, clock: &FixedClock) -> Session {
        Session::new(Arc::new(store.clone()), Arc::new(clock.clone()))
    }

    #[test]
    fn decode_reads_payload_without_signature_check() {
        let claims = decode_claims(&token_with(&claims_expiring_at(100))).unwrap();
        assert_eq!(claims.id, 7);
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.exp, 100);
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        assert!(decode_claims("").is_none());
        assert!(decode_claims("a.b").is_none());
        assert!(decode_claims("a.b.c.d").is_none());
        assert!(decode_claims("a.!!!.c").is_none());
        assert!(decode_claims(&format!("a.{}.c", URL_SAFE_NO_PAD.encode("[]"))).is_none());
    }

    #[test]
    fn restore_without_token_is_logged_out() {
        let clock = test_clock();
        let store = MemoryTokenStore::new();
        assert_eq!(session(&store, &clock).restore().unwrap(), SessionState::LoggedOut);
    }

    #[test]
    fn restore_keeps_live_token() {
        let clock = test_clock();
        let token = token_with(&claims_expiring_at(clock.now().timestamp() + 60));
        let store = MemoryTokenStore::with_token(token.clone());

        let state = session(&store, &clock).restore().unwrap();

        assert_eq!(state.token(), Some(token.as_str()));
        assert_eq!(state.claims().unwrap().full_name, "Ada");
    }

    #[test]
    fn restore_clears_token_at_expiry() {
        let clock = test_clock();
        let token = token_with(&claims_expiring_at(clock.now().timestamp()));
        let store = MemoryTokenStore::with_token(token);

        assert_eq!(session(&store, &clock).restore().unwrap(), SessionState::LoggedOut);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn restore_clears_garbage_token() {
        let clock = test_clock();
        let store = MemoryTokenStore::with_token("garbage");

        assert_eq!(session(&store, &clock).restore().unwrap(), SessionState::LoggedOut);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn start_rejects_unreadable_token_without_saving() {
        let clock = test_clock();
        let store = MemoryTokenStore::new();

        let result = session(&store, &clock).start("garbage".to_string());

        assert!(matches!(result, Err(ClientError::ResponseParseFailed(_))));
        assert_eq!(store.load().unwrap(), None);
    }
}
