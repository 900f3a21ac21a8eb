use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use weathermap::{WeatherMapConfig, logging, web};

/// Interactive world map that shows current weather for any clicked location
#[derive(Debug, Parser)]
#[command(name = "weathermap", version, about)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "WEATHERMAP_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = WeatherMapConfig::load_from_path(cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    logging::init(&config.logging, cli.verbose)?;
    tracing::debug!(server = ?config.server, map = ?config.map, "Loaded configuration");

    web::run(&config).await
}
