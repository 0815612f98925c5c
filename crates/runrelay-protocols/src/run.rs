//! Run data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RelayError;
use crate::extract::extract_text;

/// Short-lived bearer credential.
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw bearer token.
    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A submitted run the relay can follow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunHandle {
    pub run_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
}

impl RunHandle {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            thread_id: None,
        }
    }

    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

/// Accepted submission as returned by the remote service.
///
/// The raw body is kept so the non-streaming endpoint can hand it back unchanged.
#[derive(Debug, Clone)]
pub struct Submission {
    pub body: Value,
}

impl Submission {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    pub fn run_id(&self) -> Option<&str> {
        self.body
            .get("run_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    pub fn thread_id(&self) -> Option<&str> {
        self.body
            .get("thread_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Convert into a handle, failing when the service omitted the run id.
    pub fn into_handle(self) -> Result<RunHandle, RelayError> {
        let run_id = self.run_id().ok_or(RelayError::MissingRunId)?.to_string();
        let thread_id = self.thread_id().map(str::to_string);
        Ok(RunHandle { run_id, thread_id })
    }
}

/// One status snapshot of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
}

impl RunSnapshot {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Default::default()
        }
    }

    /// Classified status, `None` when the service reported no status.
    pub fn run_status(&self) -> Option<RunStatus> {
        self.status.as_deref().map(RunStatus::parse)
    }

    /// Remote-reported error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_ref()
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
    }

    /// Text content of a completed run.
    pub fn result_text(&self) -> Result<String, RelayError> {
        let result = self
            .result
            .as_ref()
            .ok_or_else(|| RelayError::MalformedResult("result is missing".to_string()))?;
        extract_text(result)
    }
}

/// Classified run status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Failed,
    Cancelled,
    Expired,
    /// Any other value; the run is still working.
    InProgress(String),
}

impl RunStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            "cancelled" => Self::Cancelled,
            "expired" => Self::Expired,
            other => Self::InProgress(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
            Self::InProgress(s) => s,
        }
    }

    /// `failed`, `cancelled` or `expired`.
    pub fn is_terminal_failure(&self) -> bool {
        matches!(self, Self::Failed | Self::Cancelled | Self::Expired)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
