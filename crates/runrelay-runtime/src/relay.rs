//! Relay state machine.
//!
//! ```text
//! Starting ──► Polling ──┬──► Completed   message + done (or error + done)
//!                ▲   │   ├──► Failed      error
//!                └───┘   └──► TimedOut    error
//! ```
//!
//! Every stream starts with `connected`. A `status` event is emitted only when
//! the reported status differs from the previous one. The stream ends after
//! exactly one terminal group of events unless the client goes away first, in
//! which case polling stops and nothing more is sent.

use std::sync::Arc;

use tokio::time::sleep;
use tracing::{debug, error, info, info_span, warn, Instrument};

use runrelay_protocols::{
    Credential, CredentialProvider, RelayError, RelayEvent, RunHandle, RunSnapshot, RunStatus,
    RunStatusPoller,
};

use crate::config::RelayConfig;
use crate::sink::{event_channel, EventSink, RelayEventStream, SinkClosed};

/// Where a relay ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    /// The run completed; `done` was sent.
    Completed,
    /// Credential, fetch or remote failure; one `error` was sent.
    Failed,
    /// Poll budget exhausted; one `error` was sent.
    TimedOut,
    /// The client went away before a terminal event could be delivered.
    Cancelled,
}

/// Drives status polling for submitted runs and relays the results as events.
#[derive(Clone)]
pub struct RunRelay {
    credentials: Arc<dyn CredentialProvider>,
    poller: Arc<dyn RunStatusPoller>,
    config: RelayConfig,
}

impl RunRelay {
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        poller: Arc<dyn RunStatusPoller>,
        config: RelayConfig,
    ) -> Self {
        Self {
            credentials,
            poller,
            config,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Start relaying `run` on a new task and return its event stream.
    pub fn spawn(&self, run: RunHandle) -> RelayEventStream {
        let (sink, stream) = event_channel(self.config.event_buffer);
        let relay = self.clone();

        tokio::spawn(async move {
            let state = relay.drive(run, sink).await;
            debug!("Relay task finished: {:?}", state);
        });

        stream
    }

    /// Run the poll loop for `run` to completion, pushing events into `sink`.
    pub async fn drive(&self, run: RunHandle, sink: EventSink) -> RelayState {
        let span = info_span!("relay", run_id = %run.run_id);

        async move {
            let state = match self.run_loop(&run, &sink).await {
                Ok(state) => state,
                Err(SinkClosed) => {
                    info!("Client disconnected, stopping relay");
                    RelayState::Cancelled
                }
            };
            info!(?state, "Relay finished");
            state
        }
        .instrument(span)
        .await
    }

    async fn run_loop(&self, run: &RunHandle, sink: &EventSink) -> Result<RelayState, SinkClosed> {
        // Starting
        sink.send(RelayEvent::connected(&run.run_id)).await?;

        let acquired = tokio::select! {
            biased;
            _ = sink.closed() => return Err(SinkClosed),
            acquired = self.credentials.acquire() => acquired,
        };
        let credential = match acquired {
            Ok(credential) => credential,
            Err(e) => {
                error!("Credential acquisition failed: {}", e);
                sink.send(RelayEvent::from(&e)).await?;
                return Ok(RelayState::Failed);
            }
        };

        // Polling
        let mut last_status: Option<String> = None;
        let mut attempt: u32 = 0;

        while attempt < self.config.max_poll_attempts {
            debug!(attempt, "Polling run status");

            let snapshot = match self.poll_once(run, &credential, sink).await? {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    sink.send(RelayEvent::from(&e)).await?;
                    return Ok(RelayState::Failed);
                }
            };

            if let Some(status) = snapshot.status.as_deref() {
                if last_status.as_deref() != Some(status) {
                    debug!(status, "Run status changed");
                    sink.send(RelayEvent::status(status)).await?;
                    last_status = Some(status.to_string());
                }
            }

            match snapshot.run_status() {
                Some(RunStatus::Completed) => {
                    return self.complete(run, &snapshot, sink).await;
                }
                Some(status) if status.is_terminal_failure() => {
                    let message = snapshot
                        .error_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("Run {}", status));
                    warn!(status = %status, "Run ended remotely: {}", message);
                    sink.send(RelayEvent::error_with_status(message, status.as_str()))
                        .await?;
                    return Ok(RelayState::Failed);
                }
                _ => {}
            }

            tokio::select! {
                biased;
                _ = sink.closed() => return Err(SinkClosed),
                _ = sleep(self.config.poll_interval) => {}
            }
            attempt += 1;
        }

        // TimedOut
        let timeout = RelayError::Timeout { attempts: attempt };
        warn!(attempts = attempt, "Run did not finish within the poll budget");
        sink.send(RelayEvent::from(&timeout)).await?;
        Ok(RelayState::TimedOut)
    }

    /// One status fetch, abandoned as soon as the client disconnects.
    ///
    /// The inner error is the failure to report in-band.
    async fn poll_once(
        &self,
        run: &RunHandle,
        credential: &Credential,
        sink: &EventSink,
    ) -> Result<Result<RunSnapshot, RelayError>, SinkClosed> {
        let fetched = tokio::select! {
            biased;
            _ = sink.closed() => return Err(SinkClosed),
            fetched = self.poller.fetch(&run.run_id, credential) => fetched,
        };

        Ok(match fetched {
            Ok(Some(snapshot)) => Ok(snapshot),
            Ok(None) => {
                // Not retried: a single unavailable fetch ends the stream.
                warn!("Run status unavailable");
                Err(RelayError::StatusUnavailable)
            }
            Err(e) => {
                error!("Run status fetch failed: {}", e);
                Err(e)
            }
        })
    }

    async fn complete(
        &self,
        run: &RunHandle,
        snapshot: &RunSnapshot,
        sink: &EventSink,
    ) -> Result<RelayState, SinkClosed> {
        match snapshot.result_text() {
            Ok(content) => {
                info!(chars = content.len(), "Run completed");
                sink.send(RelayEvent::message(content)).await?;
            }
            Err(e) => {
                warn!("Run completed but its result could not be read: {}", e);
                sink.send(RelayEvent::from(&e)).await?;
            }
        }

        let thread_id = snapshot
            .thread_id
            .clone()
            .or_else(|| run.thread_id.clone());
        sink.send(RelayEvent::done(&run.run_id, thread_id)).await?;
        Ok(RelayState::Completed)
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
