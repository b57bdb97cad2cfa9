// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use scrapyd_client::ScrapydClient;
use server_core::{
    kernel::{connect_store, spawn_keepalive},
    server::{build_app, AppState},
    Config,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,job_scraper=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job scraper API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        scrapyd_url = %config.scrapyd_url,
        project = %config.scrapyd_project,
        sources = ?config.sources,
        "Configuration loaded"
    );

    // Open posting store (runs migrations for SQL backends)
    let store = connect_store(config.database_url.as_deref()).await?;

    // Execution service client; each call is bounded by the dispatch timeout
    let scrapyd = ScrapydClient::new(&config.scrapyd_url).with_request_timeout(config.dispatch_timeout);

    let shutdown = CancellationToken::new();
    let keepalive = if config.keepalive_enabled {
        Some(spawn_keepalive(
            scrapyd.clone(),
            config.keepalive_config(),
            shutdown.clone(),
        ))
    } else {
        tracing::info!("Scrapyd keep-alive disabled");
        None
    };

    // Build application
    let state = AppState::new(store, Arc::new(scrapyd), &config);
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    let signal_token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
            signal_token.cancel();
        })
        .await
        .context("Server error")?;

    shutdown.cancel();
    if let Some(handle) = keepalive {
        let _ = handle.await;
    }

    Ok(())
}
