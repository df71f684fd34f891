//! CLI definitions for trafficstate.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use trafficstate_config::DEFAULT_CONFIG_PATH;

/// trafficstate CLI.
#[derive(Parser)]
#[command(name = "trafficstate")]
#[command(about = "Polls live route travel times and publishes them to openHAB items")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the scheduler and HTTP server in foreground (default)
    Run {
        /// Server host, overrides [server].host
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides [server].port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Load and validate the configuration
    Check,

    /// Print the routing request URL for a route (API key redacted)
    Link {
        /// Route ID
        route_id: String,
    },
}
