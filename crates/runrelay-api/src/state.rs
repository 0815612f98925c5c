//! Application state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use runrelay_protocols::RunSubmitter;
use runrelay_runtime::RunRelay;

/// State shared across handlers.
pub struct AppState {
    pub submitter: Arc<dyn RunSubmitter>,
    pub relay: RunRelay,
    start_time: Instant,
    request_count: AtomicU64,
}

impl AppState {
    pub fn new(submitter: Arc<dyn RunSubmitter>, relay: RunRelay) -> Self {
        Self {
            submitter,
            relay,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}
