//! Relay errors.

use thiserror::Error;

/// Failures raised by the relay and its remote collaborators.
///
/// Errors raised before a stream starts become ordinary failed HTTP responses.
/// Errors raised after the stream starts are reported as in-band `error` events
/// using the `Display` text as the event message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Run submission rejected: {status} - {body}")]
    Submission { status: u16, body: String },

    #[error("No run_id returned from agent")]
    MissingRunId,

    #[error("status unavailable")]
    StatusUnavailable,

    #[error("Parse error: {0}")]
    MalformedResult(String),

    #[error("No text content found in response")]
    EmptyContent,

    #[error("Request timeout")]
    Timeout { attempts: u32 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
