//! Orchestrate runs API client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use runrelay_protocols::{
    Credential, CredentialProvider, RelayError, RunSnapshot, RunStatusPoller, RunSubmitter,
    Submission,
};

use crate::api::{RunMessage, RunRequest};

/// Client for `{instance_url}/v1/orchestrate/runs`.
pub struct OrchestrateClient {
    runs_url: String,
    agent_id: String,
    credentials: Arc<dyn CredentialProvider>,
    client: reqwest::Client,
}

impl OrchestrateClient {
    pub fn new(
        instance_url: &str,
        agent_id: String,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;

        Ok(Self {
            runs_url: format!("{}/v1/orchestrate/runs", instance_url.trim_end_matches('/')),
            agent_id,
            credentials,
            client,
        })
    }

    fn run_url(&self, run_id: &str) -> String {
        format!("{}/{}", self.runs_url, run_id)
    }
}

#[async_trait]
impl RunSubmitter for OrchestrateClient {
    async fn submit(&self, message: &str, thread_id: Option<&str>) -> Result<Submission, RelayError> {
        let credential = self.credentials.acquire().await?;
        let request = RunRequest {
            agent_id: &self.agent_id,
            message: RunMessage::user(message),
            thread_id: thread_id.filter(|t| !t.is_empty()),
        };

        let response = self
            .client
            .post(&self.runs_url)
            .bearer_auth(credential.token())
            .json(&request)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 && status != 202 {
            let body = response.text().await.unwrap_or_default();
            warn!(status, "Run submission rejected");
            return Err(RelayError::Submission { status, body });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
        let submission = Submission::new(body);
        info!(
            run_id = submission.run_id().unwrap_or_default(),
            thread_id = submission.thread_id().unwrap_or_default(),
            "Run submitted"
        );
        Ok(submission)
    }
}

#[async_trait]
impl RunStatusPoller for OrchestrateClient {
    async fn fetch(
        &self,
        run_id: &str,
        credential: &Credential,
    ) -> Result<Option<RunSnapshot>, RelayError> {
        let response = self
            .client
            .get(self.run_url(run_id))
            .bearer_auth(credential.token())
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if response.status() != reqwest::StatusCode::OK {
            debug!(status = response.status().as_u16(), "Run status not available");
            return Ok(None);
        }

        let snapshot = response
            .json::<RunSnapshot>()
            .await
            .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
