// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use trend_dashboard::application::dashboard_pipeline::DashboardPipeline;
use trend_dashboard::application::fetch_orchestrator::FetchOrchestrator;
use trend_dashboard::infrastructure::config::load_dashboard_config;
use trend_dashboard::infrastructure::http_analytics_repository::HttpAnalyticsRepository;
use trend_dashboard::presentation::app_state::AppState;
use trend_dashboard::presentation::handlers::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpAnalyticsRepository::new(
        &config.analytics.base_url,
        config.analytics.request_timeout(),
    )?);

    // Create pipeline (application layer)
    let orchestrator = FetchOrchestrator::new(repository, config.analytics.request_timeout());
    let pipeline = DashboardPipeline::new(orchestrator);

    // Initial mount loads the configured region
    pipeline.select_region(config.dashboard.initial_region);

    let state = Arc::new(AppState { pipeline });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.server.bind_address.parse()?;
    tracing::info!(
        %addr,
        analytics = %config.analytics.base_url,
        "starting trend-dashboard service"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
