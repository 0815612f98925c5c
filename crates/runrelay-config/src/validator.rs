//! Configuration validation.

use url::Url;

use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_orchestrate(config, &mut result);
        Self::validate_relay(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_orchestrate(config: &Config, result: &mut ValidationResult) {
        let orchestrate = &config.orchestrate;

        Self::validate_url(
            "orchestrate.instance_url",
            &orchestrate.instance_url,
            result,
        );
        Self::validate_url("orchestrate.token_url", &orchestrate.token_url, result);

        if orchestrate.agent_id.is_empty() {
            result.add_error(ValidationError::new(
                "orchestrate.agent_id",
                "agent_id cannot be empty",
            ));
        }

        match orchestrate.api_key.as_deref() {
            None | Some("") => result.add_error(ValidationError::new(
                "orchestrate.api_key",
                "API key is not set (config file, --api-key or WXO_API_KEY)",
            )),
            Some(_) => {}
        }

        if orchestrate.request_timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "orchestrate.request_timeout_seconds",
                "request_timeout_seconds must be greater than 0",
            ));
        }
    }

    fn validate_url(path: &str, value: &str, result: &mut ValidationResult) {
        if value.is_empty() {
            result.add_error(ValidationError::new(path, "URL cannot be empty"));
            return;
        }
        match Url::parse(value) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                if url.scheme() == "http" {
                    result.add_warning(ValidationWarning::new(
                        path,
                        "URL uses plain http; credentials will be sent unencrypted",
                    ));
                }
            }
            Ok(_) => result.add_error(ValidationError::new(
                path,
                "URL must start with http:// or https://",
            )),
            Err(e) => result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e))),
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        let relay = &config.relay;

        if relay.max_poll_attempts == 0 {
            result.add_error(ValidationError::new(
                "relay.max_poll_attempts",
                "max_poll_attempts must be greater than 0",
            ));
        }

        if relay.event_buffer == 0 {
            result.add_error(ValidationError::new(
                "relay.event_buffer",
                "event_buffer must be greater than 0",
            ));
        }

        if relay.poll_interval_ms < 100 {
            result.add_warning(ValidationWarning::new(
                "relay.poll_interval_ms",
                "poll_interval_ms is below 100ms, this may flood the remote service",
            ));
        }

        let budget_ms = relay.poll_interval_ms.saturating_mul(relay.max_poll_attempts as u64);
        if budget_ms > 30 * 60 * 1000 {
            result.add_warning(ValidationWarning::new(
                "relay.max_poll_attempts",
                "poll budget exceeds 30 minutes, streams may stay open for a long time",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
