//! Duet gateway binary entry point.
//!
//! Loads TOML configuration, builds the router, and runs the axum
//! server with graceful shutdown on ctrl-c.

use anyhow::Result;
use duet_gateway::{AppState, GatewayConfig, router};
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load configuration, falling back to the built-in demo defaults
    // when no config file is present.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "gateway.toml".to_string());
    let config = if Path::new(&config_path).exists() {
        let config = GatewayConfig::load(Path::new(&config_path))?;
        tracing::info!("loaded configuration from {config_path}");
        config
    } else {
        tracing::info!("no {config_path}, using defaults");
        GatewayConfig::default()
    };

    for agent in &config.agents {
        tracing::info!(
            "agent '{}' via {:?}, model {}",
            agent.name,
            agent.provider,
            agent.model
        );
    }

    let bind = config.server.bind.clone();
    let state = AppState {
        config: Arc::new(config),
        client: llm::Client::new(),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("gateway listening on {bind}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway shut down");
    Ok(())
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("received shutdown signal");
}
