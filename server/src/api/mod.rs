//! HTTP API endpoints.

pub mod events;
