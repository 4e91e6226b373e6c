//! # Event Tracker Client
//!
//! Typed HTTP client for the event tracker API, plus the session handling
//! and view state a front end needs.
//!
//! ## Example
//!
//! ```no_run
//! use eventtracker_client::{ApiClient, EventTracker, MemoryTokenStore, Session};
//! use eventtracker_core::environment::SystemClock;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let session = Session::new(Arc::new(MemoryTokenStore::new()), Arc::new(SystemClock));
//!     let mut tracker = EventTracker::open(ApiClient::new("http://localhost:5000"), session)?;
//!
//!     tracker.login("ada@example.com", "secret").await?;
//!     for event in tracker.feed().await? {
//!         println!("{} on {}", event.title, event.date);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod error;
pub mod session;
pub mod token_store;
pub mod types;

pub use api::{ApiClient, DEFAULT_SERVER_URL};
pub use app::EventTracker;
pub use error::{ClientError, FALLBACK_ERROR_MESSAGE};
pub use session::{Session, SessionState, decode_claims};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use types::{CreateEvent, EventUpdate, LoginResponse, MessageResponse, TokenClaims, UserSummary};
