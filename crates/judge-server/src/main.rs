//! stock-judge HTTP server
//!
//! Reads configuration from the environment (and `.env` when present) and
//! refuses to start unless both `FMP_API_KEY` and `GEMINI_API_KEY` are set.

use anyhow::Context;
use judge_server::{AppState, create_router};
use judge_stock::StockConfig;
use judge_utils::{Config, init_tracing_with};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let app_config = Config::from_env();
    init_tracing_with(app_config.log_format(), "info");

    let config = StockConfig::default().with_env_api_keys();
    let state = AppState::from_config(&config).context("Invalid server configuration")?;

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{port}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        environment = %app_config.environment,
        model = %config.model,
        language = %config.response_language,
        "HTTP server listening on {addr}"
    );

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
}
