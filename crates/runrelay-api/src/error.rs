//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::warn;

use runrelay_protocols::RelayError;

/// Errors returned by handlers before any response body has been streamed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Relay(RelayError::Submission { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Relay(RelayError::Network(_) | RelayError::InvalidResponse(_)) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field.
    pub fn detail(&self) -> String {
        match self {
            Self::Relay(RelayError::Auth(_)) => "Failed to fetch IAM token".to_string(),
            Self::Relay(RelayError::Submission { body, .. }) => body.clone(),
            Self::Relay(other) => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), "Request failed: {}", self);
        (status, Json(serde_json::json!({ "detail": self.detail() }))).into_response()
    }
}
