//! Axum plumbing shared by the event tracker HTTP surfaces.
//!
//! This crate holds everything between the router and the domain that is not
//! specific to one endpoint:
//!
//! - [`AppError`]: the single error type handlers return, rendered as
//!   `{"code": ..., "message": ...}` with the right status
//! - Extractors: [`CorrelationId`], [`BearerToken`] and [`JsonBody`] (a JSON
//!   body whose rejections are validation errors rather than axum's 422)
//! - Middleware: correlation-id propagation, the per-request span and the
//!   CORS layer
//! - Liveness and readiness responses
//!
//! # Example
//!
//! ```ignore
//! use eventtracker_web::{AppError, JsonBody};
//! use axum::{Router, routing::post, Json};
//!
//! async fn create(JsonBody(request): JsonBody<CreateRequest>) -> Result<Json<Created>, AppError> {
//!     let input = request.validate()?;
//!     Ok(Json(service.create(input).await?))
//! }
//!
//! let app = Router::new()
//!     .route("/things", post(create))
//!     .layer(eventtracker_web::correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{BearerToken, CorrelationId, JsonBody};
pub use middleware::{CORRELATION_ID_HEADER, RequestSpan, correlation_id_layer, cors_layer};
