//! HTTP request handlers.
//!
//! Only cross-cutting handlers live here; domain endpoints belong to the
//! crates that own them.

pub mod health;

// Re-export common handler utilities
pub use health::{HealthResponse, ReadinessReport, health_check};
