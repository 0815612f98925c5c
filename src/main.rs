//! runrelay - relays remote agent runs to clients as server-sent events.

mod cli;
mod server;

use clap::Parser;

use runrelay_config::ConfigLoader;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    cli.apply_overrides(&mut config);

    match cli.command {
        Some(Commands::Validate) => {
            if server::report_validation(&config) {
                println!("Configuration OK: {}", cli.config.display());
                Ok(())
            } else {
                Err("invalid configuration".into())
            }
        }
        None | Some(Commands::Run { .. }) => {
            server::init_tracing(&config.logging)?;
            server::run_server(config).await
        }
    }
}
