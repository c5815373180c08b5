// Main entry point for the bot server

use anyhow::{Context, Result};
use bot_core::domains::exhibitions::ExhibitionIndex;
use bot_core::server::{build_app, build_deps};
use bot_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bot_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting exhibition guide bot");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Load the dataset once; queries are served from memory
    let exhibitions = ExhibitionIndex::load(&config.dataset_path).with_context(|| {
        format!("Failed to load dataset from {}", config.dataset_path.display())
    })?;
    tracing::info!(
        path = %config.dataset_path.display(),
        exhibitions = exhibitions.exhibition_count(),
        "Dataset loaded"
    );

    // Build application
    let app = build_app(build_deps(&config, exhibitions));

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Webhook: http://localhost:{}/callback", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
