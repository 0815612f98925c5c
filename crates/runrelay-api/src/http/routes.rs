//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{chat, chat_stream};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the router.
///
/// ```text
/// POST /api/chat/stream - Submit a run, stream its events (SSE)
/// POST /api/chat        - Submit a run, return the submission body
/// GET  /health          - Health and relay settings
/// GET  /livez           - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/chat/stream", post(chat_stream))
        .route("/chat", post(chat));

    Router::new()
        .nest("/api", api)
        .route("/health", get(monitoring::health_check))
        .route("/livez", get(monitoring::liveness_probe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
