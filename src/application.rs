//! Application Lifecycle
//!
//! Logger setup, session construction, HTTP server startup, and graceful
//! shutdown on SIGINT/SIGTERM.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::resolve_path;
use crate::server::{self, AppState};
use crate::service::LifeService;
use crate::state::FileDensityLog;
use crate::types::AppConfig;

/// Initialize the global `tracing` subscriber.
///
/// Logs go to the configured log file (appending, ANSI disabled) or to
/// stderr when no path is set. `RUST_LOG` overrides the configured level.
pub fn setup_logger(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    if config.logs_path.is_empty() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let path = resolve_path(&config.logs_path);
    if let Some(parent) = Path::new(&path).parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory for {path}"))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Run the life server until a shutdown signal arrives.
pub async fn run(config: AppConfig) -> Result<()> {
    setup_logger(&config)?;

    info!(
        env = %config.env,
        started_at = %chrono::Utc::now().to_rfc3339(),
        "life server starting"
    );

    let rng = StdRng::from_entropy();
    let service = LifeService::new(
        config.life.height,
        config.life.width,
        config.life.fill,
        rng,
    )
    .context("failed to build life session")?;

    let sink = FileDensityLog::new(resolve_path(&config.states_path));
    let state = Arc::new(AppState {
        service: Mutex::new(service),
        sink: Box::new(sink),
    });

    let timeout = Duration::from_secs(config.http_server.timeout_secs);
    let app = server::router(state, timeout);

    let listener = TcpListener::bind(&config.http_server.address)
        .await
        .with_context(|| format!("failed to bind {}", config.http_server.address))?;
    info!(address = %config.http_server.address, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down gracefully");
    Ok(())
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");

        tokio::select! {
            _ = ctrl_c => {
                info!("received SIGINT, shutting down");
            }
            _ = sigterm.recv() => {
                info!("received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.expect("Failed to register Ctrl+C handler");
        info!("received shutdown signal");
    }
}
