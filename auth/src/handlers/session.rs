//! Sign-up, login and current-user handlers.

use super::AuthUser;
use crate::service::{AuthService, LoginRequest, LoginResponse, MessageResponse, SignupRequest};
use crate::token::Claims;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use eventtracker_web::{AppError, JsonBody};
use std::sync::Arc;

/// Create the authentication router.
///
/// # Routes
///
/// - `POST /signup` - Register a user (201, no token)
/// - `POST /login` - Exchange credentials for a token
/// - `GET /me` - Claims of the presented token
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/auth", auth_router(service))
///     .layer(TraceLayer::new_for_http());
/// ```
pub fn auth_router<S>(service: Arc<AuthService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state(service)
}

/// `POST /signup`
///
/// # Errors
///
/// 400 on missing fields or a registered email, 500 on store failure.
pub async fn signup(
    State(service): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let response = service.signup(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// `POST /login`
///
/// # Errors
///
/// 400 on missing fields, unknown email or wrong password; 500 on failure.
pub async fn login(
    State(service): State<Arc<AuthService>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(service.login(request).await?))
}

/// `GET /me`
pub async fn me(AuthUser(claims): AuthUser) -> Json<Claims> {
    Json(claims)
}
