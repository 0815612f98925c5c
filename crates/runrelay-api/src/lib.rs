//! # runrelay API
//!
//! HTTP layer in front of the run relay.
//!
//! ```text
//! POST /api/chat/stream ──► submit run ──► RunRelay::spawn ──► SSE frames
//! POST /api/chat        ──► submit run ──► raw submission JSON
//! GET  /livez, /health
//! ```
//!
//! Failures before the stream starts are plain HTTP errors with a
//! `{"detail": ...}` body. Once the stream has started every failure is
//! delivered as an in-band `error` event.

pub mod error;
pub mod http;
pub mod server;
pub mod sse;
pub mod state;

pub use error::ApiError;
pub use http::handlers::ChatRequest;
pub use http::routes::create_router;
pub use server::{ListenConfig, RelayServer};
pub use state::AppState;

#[cfg(test)]
pub(crate) mod test_support;
