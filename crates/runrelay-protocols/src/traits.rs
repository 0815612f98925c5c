//! Collaborator traits driven by the relay.

use async_trait::async_trait;

use crate::error::RelayError;
use crate::run::{Credential, RunSnapshot, Submission};

/// Exchanges a long-lived secret for a short-lived bearer credential.
///
/// One network call per invocation; implementations do not cache or retry.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn acquire(&self) -> Result<Credential, RelayError>;
}

/// Starts a remote run.
#[async_trait]
pub trait RunSubmitter: Send + Sync {
    /// Submit `message`, continuing `thread_id` when given.
    ///
    /// Fails with [`RelayError::Submission`] when the service does not accept
    /// the run. The returned [`Submission`] still has to be checked for a run id.
    async fn submit(
        &self,
        message: &str,
        thread_id: Option<&str>,
    ) -> Result<Submission, RelayError>;
}

/// Fetches one status snapshot of a run.
#[async_trait]
pub trait RunStatusPoller: Send + Sync {
    /// `Ok(None)` means the status was unavailable this attempt.
    /// `Err(_)` is reserved for unexpected failures of the call itself.
    async fn fetch(
        &self,
        run_id: &str,
        credential: &Credential,
    ) -> Result<Option<RunSnapshot>, RelayError>;
}
