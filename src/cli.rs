//! CLI definitions for runrelay.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use runrelay_config::Config;

/// runrelay CLI.
#[derive(Parser)]
#[command(name = "runrelay")]
#[command(about = "Relay remote agent runs to clients as server-sent events")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/runrelay.toml", global = true)]
    pub config: PathBuf,

    /// API key exchanged for bearer tokens
    #[arg(long, env = "WXO_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Orchestrate instance URL
    #[arg(long, env = "WXO_INSTANCE_URL", global = true)]
    pub instance_url: Option<String>,

    /// Agent that runs are started on
    #[arg(long, env = "AGENT_ID", global = true)]
    pub agent_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub(crate) enum Commands {
    /// Run the server in foreground (default)
    Run {
        /// Server host (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate the configuration, then exit
    Validate,
}

impl Cli {
    /// Apply command line and environment overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(api_key) = &self.api_key {
            config.orchestrate.api_key = Some(api_key.clone());
        }
        if let Some(instance_url) = &self.instance_url {
            config.orchestrate.instance_url = instance_url.clone();
        }
        if let Some(agent_id) = &self.agent_id {
            config.orchestrate.agent_id = agent_id.clone();
        }
        if let Some(Commands::Run { host, port }) = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }
}
