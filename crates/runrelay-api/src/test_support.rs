//! Scripted collaborators for handler and router tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use runrelay_protocols::{
    Credential, CredentialProvider, RelayError, RunSnapshot, RunStatusPoller, RunSubmitter,
    Submission,
};
use runrelay_runtime::{RelayConfig, RunRelay};

use crate::state::AppState;

pub struct FakeCredentials;

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn acquire(&self) -> Result<Credential, RelayError> {
        Ok(Credential::new("tok"))
    }
}

/// Answers every submission with the same result.
pub struct FakeSubmitter {
    pub result: Result<Value, RelayError>,
    pub seen: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeSubmitter {
    pub fn accepting(body: Value) -> Self {
        Self {
            result: Ok(body),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: RelayError) -> Self {
        Self {
            result: Err(error),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RunSubmitter for FakeSubmitter {
    async fn submit(&self, message: &str, thread_id: Option<&str>) -> Result<Submission, RelayError> {
        self.seen
            .lock()
            .push((message.to_string(), thread_id.map(str::to_string)));
        self.result.clone().map(Submission::new)
    }
}

/// Replays a fixed list of snapshots, then reports the run as running.
pub struct FakePoller {
    script: Mutex<VecDeque<Result<Option<RunSnapshot>, RelayError>>>,
    pub calls: AtomicUsize,
}

impl FakePoller {
    pub fn new(script: Vec<Result<Option<RunSnapshot>, RelayError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RunStatusPoller for FakePoller {
    async fn fetch(
        &self,
        _run_id: &str,
        _credential: &Credential,
    ) -> Result<Option<RunSnapshot>, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(RunSnapshot::with_status("running"))))
    }
}

pub fn completed(text: &str) -> Result<Option<RunSnapshot>, RelayError> {
    Ok(Some(RunSnapshot {
        status: Some("completed".to_string()),
        result: Some(json!({
            "data": {"message": {"content": [{"type": "text", "text": text}]}}
        })),
        ..Default::default()
    }))
}

pub fn state_with(submitter: Arc<FakeSubmitter>, poller: Arc<FakePoller>) -> Arc<AppState> {
    let relay = RunRelay::new(
        Arc::new(FakeCredentials),
        poller,
        RelayConfig::default().with_poll_interval(Duration::from_millis(10)),
    );
    Arc::new(AppState::new(submitter, relay))
}
