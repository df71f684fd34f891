//! trafficstate - live route traffic poller.
//!
//! Main entry point for the trafficstate CLI and server.

use clap::Parser;
use tracing::{error, warn};

use trafficstate_config::{ConfigLoader, ConfigValidator};

mod cli;
mod cmd_check;
mod cmd_link;
mod register;
mod server;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run {
        host: None,
        port: None,
    }) {
        Commands::Run { host, port } => {
            server::init_tracing()?;

            let mut config = ConfigLoader::load(&cli.config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let validation = ConfigValidator::validate(&config)?;
            for warning in &validation.warnings {
                warn!("Config {}: {}", warning.path, warning.message);
            }
            if !validation.is_valid() {
                for err in &validation.errors {
                    error!("Config {}: {}", err.path, err.message);
                }
                return Err(format!(
                    "{} has {} configuration error(s)",
                    cli.config.display(),
                    validation.errors.len()
                )
                .into());
            }

            server::run_server(config).await
        }
        Commands::Check => cmd_check::cmd_check(&cli.config),
        Commands::Link { route_id } => cmd_link::cmd_link(&cli.config, &route_id),
    }
}
