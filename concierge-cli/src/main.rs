//! Concierge command line
//!
//! Starts the Concierge MCP server: a bearer-token-gated streamable HTTP
//! endpoint exposing the fetch, resume, and validate tools.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use concierge_config::ServerConfig;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "concierge",
    about = "Personal MCP server: web fetch, resume, identity validation",
    version
)]
struct Cli {
    /// Path to the configuration file (defaults to concierge.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "debug")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server over streamable HTTP
    Serve {
        /// Bind host, overriding the configured value
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding the configured value
        #[arg(long)]
        port: Option<u16>,
    },
}

fn configure_logging(debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

    let level = if quiet {
        "error"
    } else if debug {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rmcp=warn,{level}")));

    registry().with(filter).with(fmt::layer()).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    configure_logging(cli.debug, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load_from(path),
        None => ServerConfig::load(),
    }
    .context("failed to load configuration")?;

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(Arc::new(config)).await
        }
    }
}

async fn serve(config: Arc<ServerConfig>) -> Result<()> {
    let mut handle = concierge_tools::mcp::start_http_server(config)
        .await
        .context("failed to start MCP server")?;

    tracing::info!("MCP server running on {}. Use Ctrl+C to stop.", handle.url());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    tracing::info!("shutting down");
    handle.shutdown();
    Ok(())
}
