//! SoilRecs HTTP server.
//!
//! Configuration comes from the environment, see `ServerConfig`.

use anyhow::{Context, Result};
use tracing::info;

use server::{create_router, AssessmentService, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,server=debug,engine=debug")
            }),
        )
        .init();

    info!("Starting SoilRecs server");

    let config = ServerConfig::from_env();
    info!("Configuration:");
    info!("  address: {}", config.socket_addr());
    info!("  catalog: {}", config.catalog);
    info!("  max records: {}", config.max_records);
    info!("  strict validation: {}", config.strict_validation);

    let service = AssessmentService::from_config(&config);
    let app = create_router(service);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.socket_addr()))?;
    info!("Server listening on {}", config.socket_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
