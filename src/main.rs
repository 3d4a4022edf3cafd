mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "todocal=info,todocal_server=info,todocal_provider_google=info,tower_http=info";

#[derive(Parser)]
#[command(name = "todocal")]
#[command(about = "Prioritize today's calendar and turn todos into calendar events")]
struct Cli {
    /// Config file (defaults to ~/.config/todocal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Authorize calendar access in the browser and store the token
    Auth,
    /// Show the effective configuration
    Config {
        /// Write a commented default config file
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command {
        Commands::Config { init: true } => commands::config::init(&config_path),
        Commands::Config { init: false } => {
            let cfg = config::load(&config_path)?;
            commands::config::show(&config_path, &cfg)
        }
        Commands::Auth => {
            let cfg = config::load(&config_path)?;
            commands::auth::run(&cfg).await
        }
        Commands::Serve { host, port } => {
            let mut cfg = config::load(&config_path)?;
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            commands::serve::run(&cfg).await
        }
    }
}
