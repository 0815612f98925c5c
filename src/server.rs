//! Server wiring and startup.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use runrelay_api::{AppState, ListenConfig, RelayServer};
use runrelay_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig, RelaySettings};
use runrelay_provider_orchestrate::{IamCredentialProvider, OrchestrateClient};
use runrelay_runtime::{RelayConfig, RunRelay};

/// Initialize tracing with console and file output.
///
/// Log files rotate daily in the configured directory.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = PathBuf::from(ConfigLoader::expand_path(&logging.dir));
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("runrelay")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the background writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

pub(crate) fn relay_config(settings: &RelaySettings) -> RelayConfig {
    RelayConfig {
        poll_interval: settings.poll_interval(),
        max_poll_attempts: settings.max_poll_attempts,
        event_buffer: settings.event_buffer,
    }
}

/// Build the shared application state from a validated config.
pub(crate) fn build_state(config: &Config) -> Result<Arc<AppState>, Box<dyn std::error::Error>> {
    let orchestrate = &config.orchestrate;
    let api_key = orchestrate
        .api_key
        .clone()
        .ok_or("orchestrate.api_key is not set")?;

    let credentials = Arc::new(IamCredentialProvider::new(
        api_key,
        orchestrate.token_url.clone(),
        orchestrate.request_timeout(),
    )?);
    let client = Arc::new(OrchestrateClient::new(
        &orchestrate.instance_url,
        orchestrate.agent_id.clone(),
        credentials.clone(),
        orchestrate.request_timeout(),
    )?);

    let relay = RunRelay::new(credentials, client.clone(), relay_config(&config.relay));
    Ok(Arc::new(AppState::new(client, relay)))
}

/// Print validation findings; returns whether the config is usable.
pub(crate) fn report_validation(config: &Config) -> bool {
    let result = ConfigValidator::validate(config);
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
        eprintln!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        eprintln!("error: {}: {}", error.path, error.message);
    }
    result.is_valid()
}

/// Run the server in foreground.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting runrelay v{}", env!("CARGO_PKG_VERSION"));

    if !report_validation(&config) {
        return Err("invalid configuration".into());
    }

    let state = build_state(&config)?;
    info!(
        agent_id = %config.orchestrate.agent_id,
        poll_interval_ms = config.relay.poll_interval_ms,
        max_poll_attempts = config.relay.max_poll_attempts,
        "Relay initialized"
    );

    let listen = ListenConfig::new(config.server.host.clone(), config.server.port);
    RelayServer::new(listen, state).run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_config() -> Config {
        let mut config = Config::default();
        config.orchestrate.instance_url = "https://example.com/instances/1".to_string();
        config.orchestrate.agent_id = "agent-1".to_string();
        config.orchestrate.api_key = Some("secret".to_string());
        config
    }

    #[test]
    fn test_relay_config_from_settings() {
        let settings = RelaySettings {
            poll_interval_ms: 250,
            max_poll_attempts: 8,
            event_buffer: 4,
        };
        let relay = relay_config(&settings);
        assert_eq!(relay.poll_interval, std::time::Duration::from_millis(250));
        assert_eq!(relay.max_poll_attempts, 8);
        assert_eq!(relay.event_buffer, 4);
    }

    #[test]
    fn test_build_state() {
        let state = build_state(&complete_config()).unwrap();
        assert_eq!(state.relay.config().max_poll_attempts, 120);
        assert_eq!(state.request_count(), 0);
    }

    #[test]
    fn test_build_state_without_api_key() {
        let mut config = complete_config();
        config.orchestrate.api_key = None;
        assert!(build_state(&config).is_err());
    }

    #[test]
    fn test_report_validation() {
        assert!(report_validation(&complete_config()));
        assert!(!report_validation(&Config::default()));
    }
}
