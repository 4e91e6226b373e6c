//! # Event Tracker Authentication
//!
//! Password sign-up, login and bearer-token sessions.
//!
//! ## Features
//!
//! - **Passwords**: bcrypt hashing on the blocking pool
//! - **Sessions**: stateless HS256 JWTs with a one-hour lifetime
//! - **Storage**: `UserRepository` trait with a `PostgreSQL` implementation
//!   (`postgres` feature) and an in-memory mock (`test-utils` feature)
//! - **HTTP**: axum handlers and the `AuthUser` extractor (`axum` feature)
//!
//! ## Architecture
//!
//! ```text
//! handler → AuthService → UserRepository (users table)
//!                       → PasswordHasher (bcrypt)
//!                       → TokenIssuer    (JWT, injected clock)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use eventtracker_auth::{AuthConfig, AuthService};
//! use eventtracker_auth::stores::PostgresUserRepository;
//!
//! let users = PostgresUserRepository::new(pool);
//! users.migrate().await?;
//!
//! let service = AuthService::from_config(&AuthConfig::default(), Arc::new(users), Arc::new(SystemClock));
//! let app = Router::new().nest("/auth", auth_router(Arc::new(service)));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod password;
pub mod providers;
pub mod service;
pub mod stores;
pub mod token;

#[cfg(feature = "axum")]
pub mod handlers;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use config::AuthConfig;
pub use error::{AuthError, Result};
pub use password::{BcryptHasher, PasswordHasher};
pub use providers::{NewUser, User, UserProfile, UserRepository};
pub use service::{AuthService, LoginRequest, LoginResponse, MessageResponse, SignupRequest};
pub use token::{Claims, TokenIssuer};

#[cfg(feature = "axum")]
pub use handlers::{AuthUser, session::auth_router};
