//! Wire types for the Orchestrate and IAM endpoints.

use serde::{Deserialize, Serialize};

pub const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Serialize)]
pub struct RunRequest<'a> {
    pub agent_id: &'a str,
    pub message: RunMessage<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct RunMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

impl<'a> RunMessage<'a> {
    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}
