//! StockLens service binary
//!
//! Boots the HTTP API on top of the evaluation service client.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stocklens::api;
use stocklens::config::AppConfig;
use stocklens::upstream::{Credentials, EvaluationClient};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load()?;
    info!("🚀 Starting StockLens ({})", config.digest());

    if let Err(e) = Credentials::resolve(&config.auth) {
        warn!(
            "⚠️ Upstream credentials incomplete ({}); requests will fail until they are set",
            e
        );
    }

    let client = EvaluationClient::new(&config.upstream, &config.auth);
    let app = api::create_router(Arc::new(client));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("✅ Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    info!("Shutdown signal received, stopping");
}
