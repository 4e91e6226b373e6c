//! Authenticated-user extractor.

use crate::service::AuthService;
use crate::token::Claims;
use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use eventtracker_web::{AppError, BearerToken, RequestSpan};
use std::sync::Arc;

/// The caller of a protected route, decoded from a valid bearer token.
///
/// Rejects with 401 when no usable `Authorization: Bearer` header is sent
/// and with 403 when the token is forged, malformed or expired.
///
/// # Example
///
/// ```ignore
/// async fn whoami(AuthUser(claims): AuthUser) -> String {
///     claims.email
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Caller's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<AuthService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let service = Arc::<AuthService>::from_ref(state);

        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(BearerToken::parse);

        let claims = service.authenticate(token.as_ref().map(|t| t.0.as_str()))?;
        let span = parts
            .extensions
            .get::<RequestSpan>()
            .map_or_else(tracing::Span::current, |request| request.0.clone());
        span.record("user_id", claims.id);

        Ok(Self(claims))
    }
}
