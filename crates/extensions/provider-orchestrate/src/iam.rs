//! IAM API-key exchange.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use runrelay_protocols::{Credential, CredentialProvider, RelayError};

use crate::api::{TokenResponse, IAM_GRANT_TYPE};

/// Exchanges a long-lived API key for a short-lived bearer token.
///
/// Every call to [`acquire`](CredentialProvider::acquire) performs a fresh
/// exchange; tokens are not cached.
pub struct IamCredentialProvider {
    api_key: String,
    token_url: String,
    client: reqwest::Client,
}

impl IamCredentialProvider {
    /// Create a provider that exchanges `api_key` at `token_url`.
    pub fn new(
        api_key: String,
        token_url: String,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RelayError::Network(e.to_string()))?;

        Ok(Self {
            api_key,
            token_url,
            client,
        })
    }
}

#[async_trait]
impl CredentialProvider for IamCredentialProvider {
    async fn acquire(&self) -> Result<Credential, RelayError> {
        debug!(url = %self.token_url, "Requesting IAM token");

        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[("grant_type", IAM_GRANT_TYPE), ("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::Auth(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "IAM token request rejected");
            return Err(RelayError::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                text
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Auth(format!("unreadable token response: {}", e)))?;

        match token.access_token {
            Some(token) if !token.is_empty() => Ok(Credential::new(token)),
            _ => Err(RelayError::Auth(
                "token response has no access_token".to_string(),
            )),
        }
    }
}

#[cfg(test)]
#[path = "iam_tests.rs"]
mod tests;
