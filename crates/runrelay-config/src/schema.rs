//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default IAM token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://iam.cloud.ibm.com/identity/token";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub orchestrate: OrchestrateConfig,

    #[serde(default)]
    pub relay: RelaySettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Remote execution service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrateConfig {
    /// Instance base URL, e.g. `https://api.us-south.watson-orchestrate.ibm.com/instances/<id>`.
    #[serde(default)]
    pub instance_url: String,

    /// Agent every run is started on.
    #[serde(default)]
    pub agent_id: String,

    /// Long-lived API key exchanged for bearer tokens.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Transport timeout applied to every outbound call.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for OrchestrateConfig {
    fn default() -> Self {
        Self {
            instance_url: String::new(),
            agent_id: String::new(),
            api_key: None,
            token_url: default_token_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl OrchestrateConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelaySettings {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Poll budget; with the default interval this is two minutes.
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,

    /// Capacity of the per-stream event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            max_poll_attempts: default_max_poll_attempts(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl RelaySettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_max_poll_attempts() -> u32 {
    120
}

fn default_event_buffer() -> usize {
    32
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Directory for rolling log files; `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,

    /// Filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_log_dir() -> String {
    "~/.runrelay/logs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
