//! Storage implementations for the auth system.
//!
//! - **User Store** (PostgreSQL) - Persistent user accounts

#[cfg(feature = "postgres")]
pub mod postgres;

// Re-exports
#[cfg(feature = "postgres")]
pub use postgres::PostgresUserRepository;
