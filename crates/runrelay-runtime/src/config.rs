//! Relay loop configuration.

use std::time::Duration;

/// Poll loop settings for one relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Pause between two status polls of a run that is still in progress.
    pub poll_interval: Duration,
    /// Maximum number of polls before the stream times out.
    pub max_poll_attempts: u32,
    /// Capacity of the per-stream event channel.
    pub event_buffer: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            max_poll_attempts: 120,
            event_buffer: 32,
        }
    }
}

impl RelayConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_attempts(mut self, attempts: u32) -> Self {
        self.max_poll_attempts = attempts;
        self
    }

    /// Upper bound on the time spent suspended between polls.
    pub fn poll_budget(&self) -> Duration {
        self.poll_interval * self.max_poll_attempts
    }
}
