//! # runrelay Protocols
//!
//! Shared definitions for the run-status relay.
//! Contains the run and event data model, the collaborator traits the relay
//! drives, the error taxonomy, and the result text extractor.
//!
//! ## Core Traits
//!
//! - [`CredentialProvider`] - Exchanges a long-lived secret for a bearer credential
//! - [`RunSubmitter`] - Starts a remote run
//! - [`RunStatusPoller`] - Fetches one status snapshot of a run

pub mod error;
pub mod event;
pub mod extract;
pub mod run;
pub mod traits;

pub use error::RelayError;
pub use event::RelayEvent;
pub use extract::extract_text;
pub use run::{Credential, RunHandle, RunSnapshot, RunStatus, Submission};
pub use traits::{CredentialProvider, RunStatusPoller, RunSubmitter};
