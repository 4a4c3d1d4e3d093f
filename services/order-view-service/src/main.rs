use anyhow::Result;
use common::config::AppConfig;
use common::telemetry::{init_telemetry, TelemetryConfig};
use std::net::SocketAddr;

mod error;
mod handlers;
mod middleware;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Configuration from environment; a missing store URL fails startup
    let config = AppConfig::from_env()?;

    init_telemetry(&TelemetryConfig {
        service_name: "order-view-service".to_string(),
        log_level: config.log_level.clone(),
        json_output: true,
    });

    tracing::info!("Starting Order View Service...");
    tracing::info!("Configuration:");
    tracing::info!("  Port: {}", config.port);
    tracing::info!("  Pool size: {}", config.store.max_connections);

    // Initialize application state
    let state = AppState::new(&config.store).await?;

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Order view service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        e
    })?;

    Ok(())
}
