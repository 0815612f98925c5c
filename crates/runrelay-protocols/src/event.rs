//! Events pushed to the client.

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// One event of a relay stream.
///
/// Serialized with a `type` tag, e.g. `{"type":"status","status":"running"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RelayEvent {
    /// First event of every stream.
    Connected { run_id: String },
    /// The run status changed.
    Status { status: String },
    /// Final text of a completed run.
    Message { content: String },
    /// Something went wrong; `status` carries the remote status when known.
    Error {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
    },
    /// Completion acknowledgement.
    Done {
        thread_id: Option<String>,
        run_id: String,
    },
}

impl RelayEvent {
    pub fn connected(run_id: impl Into<String>) -> Self {
        Self::Connected {
            run_id: run_id.into(),
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self::Status {
            status: status.into(),
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self::Message {
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            status: None,
        }
    }

    pub fn error_with_status(message: impl Into<String>, status: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            status: Some(status.into()),
        }
    }

    pub fn done(run_id: impl Into<String>, thread_id: Option<String>) -> Self {
        Self::Done {
            thread_id,
            run_id: run_id.into(),
        }
    }

    /// The wire `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Status { .. } => "status",
            Self::Message { .. } => "message",
            Self::Error { .. } => "error",
            Self::Done { .. } => "done",
        }
    }
}

impl From<&RelayError> for RelayEvent {
    fn from(err: &RelayError) -> Self {
        Self::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connected_serialize() {
        let json = serde_json::to_value(RelayEvent::connected("r1")).unwrap();
        assert_eq!(json, json!({"type": "connected", "run_id": "r1"}));
    }

    #[test]
    fn test_status_serialize() {
        let json = serde_json::to_value(RelayEvent::status("running")).unwrap();
        assert_eq!(json, json!({"type": "status", "status": "running"}));
    }

    #[test]
    fn test_message_serialize() {
        let json = serde_json::to_value(RelayEvent::message("Hi there")).unwrap();
        assert_eq!(json, json!({"type": "message", "content": "Hi there"}));
    }

    #[test]
    fn test_error_without_status_omits_field() {
        let json = serde_json::to_value(RelayEvent::error("Request timeout")).unwrap();
        assert_eq!(json, json!({"type": "error", "message": "Request timeout"}));
    }

    #[test]
    fn test_error_with_status() {
        let json =
            serde_json::to_value(RelayEvent::error_with_status("rate limited", "failed")).unwrap();
        assert_eq!(
            json,
            json!({"type": "error", "message": "rate limited", "status": "failed"})
        );
    }

    #[test]
    fn test_done_keeps_null_thread() {
        let json = serde_json::to_value(RelayEvent::done("r1", None)).unwrap();
        assert_eq!(json, json!({"type": "done", "thread_id": null, "run_id": "r1"}));
    }

    #[test]
    fn test_event_deserialize() {
        let event: RelayEvent =
            serde_json::from_str(r#"{"type":"done","thread_id":"t1","run_id":"r1"}"#).unwrap();
        assert_eq!(event, RelayEvent::done("r1", Some("t1".to_string())));
    }

    #[test]
    fn test_kind_matches_tag() {
        let events = vec![
            RelayEvent::connected("r1"),
            RelayEvent::status("running"),
            RelayEvent::message("x"),
            RelayEvent::error("x"),
            RelayEvent::done("r1", None),
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }

    #[test]
    fn test_from_relay_error() {
        let event = RelayEvent::from(&RelayError::EmptyContent);
        assert_eq!(event, RelayEvent::error("No text content found in response"));
    }
}
