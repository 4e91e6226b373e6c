//! # Event Tracker Server
//!
//! REST API for signing up, logging in, and creating, commenting on, liking
//! and attending events.
//!
//! ## Architecture
//!
//! ```text
//! request → correlation id → trace → CORS → router
//!         → AuthUser (protected routes) → handler → repository → JSON
//! ```
//!
//! Stores are built once in `main`, injected through [`AppState`], and closed
//! on shutdown.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use routes::build_router;
pub use state::AppState;
