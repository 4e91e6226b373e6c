//! `PostgreSQL` drivers for the event tracker.
//!
//! This crate provides:
//!
//! - [`connect`]: bounded connection pool construction from a [`PostgresConfig`]
//! - [`PostgresEventRepository`]: the event document store, one JSONB document
//!   per row, implementing [`EventRepository`](eventtracker_core::EventRepository)
//!
//! Pools are created once at start-up, injected into the repositories, and
//! closed explicitly during shutdown.
//!
//! # Example
//!
//! ```no_run
//! use eventtracker_postgres::{PostgresConfig, PostgresEventRepository, connect};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect(&PostgresConfig::from_url("postgres://localhost/eventtracker_events")?).await?;
//!     let events = PostgresEventRepository::new(pool, "events")?;
//!     events.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use eventtracker_core::StoreError;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub mod event_repository;

pub use event_repository::{PostgresEventRepository, validate_table_name};

/// Connection pool settings for one `PostgreSQL` database.
#[derive(Clone)]
pub struct PostgresConfig {
    /// Connection target and credentials.
    pub options: PgConnectOptions,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of idle connections kept open.
    pub min_connections: u32,
    /// How long a request waits for a free connection.
    pub acquire_timeout: Duration,
    /// Connections idle longer than this are closed.
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    /// Settings for `options` with the default pool bounds.
    #[must_use]
    pub fn new(options: PgConnectOptions) -> Self {
        Self {
            options,
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Settings for a connection URL. Credentials in the URL must be percent-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Configuration`] if `url` is not a valid `PostgreSQL` URL.
    pub fn from_url(url: &str) -> Result<Self, StoreError> {
        PgConnectOptions::from_str(url)
            .map(Self::new)
            .map_err(|e| StoreError::Configuration(format!("Invalid database URL: {e}")))
    }

    /// Settings from discrete connection parts. Values are used verbatim.
    #[must_use]
    pub fn from_parts(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self::new(
            PgConnectOptions::new()
                .host(host)
                .port(port)
                .username(user)
                .password(password)
                .database(database),
        )
    }
}

impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("database", &self.options.get_database())
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("idle_timeout", &self.idle_timeout)
            .finish_non_exhaustive()
    }
}

/// Open a bounded connection pool.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the initial connection cannot be established.
pub async fn connect(config: &PostgresConfig) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .connect_with(config.options.clone())
        .await
        .map_err(|e| StoreError::Database(format!("Failed to connect: {e}")))
}
