//! Stockscope API Server
//!
//! HTTP API server with health check, metrics, and the analysis endpoint.
//! This service is stateless and can be horizontally scaled.

use dotenvy::dotenv;
use std::sync::Arc;
use stockscope::config::{get_environment, get_port, AnalysisSettings, FetchConfig};
use stockscope::core::http::start_server;
use stockscope::logging::{self, LogOutput};
use stockscope::services::yahoo::YahooMarketDataProvider;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging("info", LogOutput::Stdout);

    let port = get_port();
    let env = get_environment();
    let fetch_config = FetchConfig::from_env();
    let settings = AnalysisSettings::from_env();

    info!("Starting Stockscope API Server");
    info!(environment = %env, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        base_url = %fetch_config.base_url,
        max_retries = fetch_config.max_retries,
        "Market data source: {}",
        fetch_config.base_url
    );

    let provider = Arc::new(YahooMarketDataProvider::new(&fetch_config)?);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, provider, settings).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
