//! watsonx Orchestrate collaborators for runrelay.
//!
//! [`IamCredentialProvider`] exchanges an API key for a bearer token and
//! [`OrchestrateClient`] creates runs and reads their status.

mod api;
mod client;
mod iam;

pub use client::OrchestrateClient;
pub use iam::IamCredentialProvider;
