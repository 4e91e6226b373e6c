//! Mock provider implementations for testing.
//!
//! In-memory implementations of the provider traits for unit and
//! integration tests.

pub mod password;
pub mod user;

pub use password::PlaintextHasher;
pub use user::MockUserRepository;
