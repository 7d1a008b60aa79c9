// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::DashboardService;
use crate::application::snapshot_fetcher::SnapshotFetcher;
use crate::infrastructure::config::load_config;
use crate::infrastructure::http_snapshot_source::HttpSnapshotSource;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_body, dashboard_metrics, dashboard_page, health_check};
use crate::presentation::views::BODY_ROUTE;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_config().context("Failed to load dashboard configuration")?;

    // Create snapshot source (infrastructure layer)
    let source = Arc::new(HttpSnapshotSource::new(&config.upstream)?);

    // Create query and service (application layer)
    let fetcher = SnapshotFetcher::new(
        config.upstream.dashboard_path.clone(),
        source,
        config.query.stale_time(),
    );
    let dashboard_service = DashboardService::new(fetcher);

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        widgets: config.widgets.clone(),
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/", get(dashboard_page))
        .route(BODY_ROUTE, get(dashboard_body))
        .route("/api/metrics", get(dashboard_metrics))
        .route("/healthz", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_addr))?;
    tracing::info!(
        "Starting posture dashboard on {} (upstream {}{})",
        addr,
        config.upstream.base_url,
        config.upstream.dashboard_path
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
