//! Sign-up, login and token authentication.
//!
//! [`AuthService`] composes a [`UserRepository`], a [`PasswordHasher`] and a
//! [`TokenIssuer`]. It is transport-agnostic; the axum handlers in
//! [`crate::handlers`] are thin wrappers around it.

use crate::config::AuthConfig;
use crate::error::{AuthError, Result};
use crate::metrics;
use crate::password::{BcryptHasher, PasswordHasher};
use crate::providers::{NewUser, UserProfile, UserRepository};
use crate::token::{Claims, TokenIssuer};
use eventtracker_core::environment::Clock;
use eventtracker_core::validation::require_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message returned on successful sign-up.
pub const SIGNUP_SUCCESS_MESSAGE: &str = "User registered successfully";

/// Message returned on successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Sign-up request body.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    /// Display name.
    pub full_name: Option<String>,
    /// Email.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Login request body.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Plain `{message}` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Signed session token.
    pub token: String,
    /// The authenticated user, without the password hash.
    pub user: UserProfile,
}

/// Authentication service.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    /// Create a service from its collaborators.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Create a service with a bcrypt hasher and token issuer built from `config`.
    #[must_use]
    pub fn from_config(
        config: &AuthConfig,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tokens = TokenIssuer::new(config.jwt_secret.as_bytes(), config.token_ttl, clock);
        Self::new(
            users,
            Arc::new(BcryptHasher::new(config.bcrypt_cost)),
            Arc::new(tokens),
        )
    }

    /// Register a new user. No token is issued.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if any field is missing or empty
    /// - [`AuthError::EmailTaken`] if the email is already registered
    /// - [`AuthError::DatabaseError`] / [`AuthError::InternalError`] on failure
    pub async fn signup(&self, request: SignupRequest) -> Result<MessageResponse> {
        let [full_name, email, password] = require_all(
            [request.full_name, request.email, request.password],
            "All fields are required",
        )?;

        let password_hash = self.hash_password(password).await?;

        let user = self
            .users
            .create_user(NewUser {
                full_name,
                email,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if *e == AuthError::EmailTaken {
                    tracing::info!("Signup rejected: email already registered");
                }
            })?;

        metrics::record_signup();
        tracing::info!(user_id = user.id, "User registered");

        Ok(MessageResponse {
            message: SIGNUP_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if email or password is missing
    /// - [`AuthError::UserNotFound`] if no user has the email
    /// - [`AuthError::InvalidCredentials`] if the password does not match
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse> {
        let [email, password] = require_all(
            [request.email, request.password],
            "Email and password are required",
        )?;

        let user = match self.users.find_by_email(&email).await {
            Ok(user) => user,
            Err(e) => {
                if e == AuthError::UserNotFound {
                    metrics::record_login(metrics::LoginOutcome::UnknownUser);
                }
                return Err(e);
            }
        };

        if !self
            .verify_password(password, user.password_hash.clone())
            .await?
        {
            metrics::record_login(metrics::LoginOutcome::InvalidCredentials);
            tracing::info!(user_id = user.id, "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let (token, _claims) = self.tokens.issue(&user)?;

        metrics::record_login(metrics::LoginOutcome::Success);
        tracing::info!(user_id = user.id, "User logged in");

        Ok(LoginResponse {
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            token,
            user: user.profile(),
        })
    }

    /// Validate a bearer token.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingToken`] if `token` is `None`
    /// - [`AuthError::InvalidToken`] if the token fails verification
    pub fn authenticate(&self, token: Option<&str>) -> Result<Claims> {
        let token = token.ok_or(AuthError::MissingToken)?;
        self.tokens.verify(token)
    }

    /// Check the user store is reachable.
    ///
    /// # Errors
    ///
    /// Returns error if the user store is unreachable.
    pub async fn ping(&self) -> Result<()> {
        self.users.ping().await
    }

    async fn hash_password(&self, password: String) -> Result<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::InternalError(format!("Hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| AuthError::InternalError(format!("Verification task failed: {e}")))?
    }
}
