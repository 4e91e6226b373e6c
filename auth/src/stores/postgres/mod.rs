//! PostgreSQL storage implementations.

pub mod user;

// Re-exports
pub use user::PostgresUserRepository;
