//! Life Server Entry Point
//!
//! Handles CLI args, configuration loading, and handing control to the
//! application runtime.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use life_server::config::load_config;
use life_server::types::default_config;

/// Game of Life generation server
#[derive(Parser, Debug)]
#[command(
    name = "life-server",
    version,
    about = "Serves successive Game of Life generations over HTTP"
)]
struct Cli {
    /// Path to the JSON config file (falls back to $CONFIG_PATH)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolved configuration and exit
    #[arg(long)]
    status: bool,
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .or_else(|| std::env::var("CONFIG_PATH").ok().map(PathBuf::from));

    let config = match config_path {
        Some(path) => load_config(&path)?,
        None => {
            eprintln!("No config given (--config or $CONFIG_PATH); using defaults.");
            default_config()
        }
    };

    if cli.status {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    life_server::application::run(config).await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Fatal: {e:#}");
        std::process::exit(1);
    }
}
