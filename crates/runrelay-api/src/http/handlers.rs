//! Chat handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use runrelay_protocols::RelayError;

use crate::error::ApiError;
use crate::sse::{sse_body_stream, sse_response};
use crate::state::AppState;

/// Body of both chat endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl ChatRequest {
    /// Thread to continue; an empty id starts a new thread.
    pub fn thread(&self) -> Option<&str> {
        self.thread_id.as_deref().filter(|t| !t.is_empty())
    }
}

/// Submit a run and stream its progress as server-sent events.
pub async fn chat_stream(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    state.increment_requests();

    let submission = state
        .submitter
        .submit(&request.message, request.thread())
        .await?;
    let run = submission.into_handle()?;
    info!(run_id = %run.run_id, "Streaming run");

    let events = state.relay.spawn(run);
    Ok(sse_response(sse_body_stream(events)))
}

/// Submit a run and return the submission body without waiting for it.
///
/// A rejected submission is answered with `{"error": <upstream body>}` and
/// the upstream status code.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    state.increment_requests();

    match state
        .submitter
        .submit(&request.message, request.thread())
        .await
    {
        Ok(submission) => Ok(Json(submission.body).into_response()),
        Err(RelayError::Submission { status, body }) => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(serde_json::json!({ "error": body }))).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
