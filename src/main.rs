// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_controller::DashboardController;
use crate::application::kpi_source::KpiSource;
use crate::application::kpi_store::KpiStore;
use crate::application::streaming_service::StreamingService;
use crate::infrastructure::config::{DashboardConfig, load_dashboard_config};
use crate::infrastructure::mock_source::MockKpiSource;
use crate::infrastructure::toml_source::TomlKpiSource;
use crate::presentation::app_state::AppState;

fn seed_source(config: &DashboardConfig) -> Box<dyn KpiSource> {
    match &config.seed.path {
        Some(path) => Box::new(TomlKpiSource::new(path)),
        None => Box::new(MockKpiSource),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_dashboard_config().context("Failed to load dashboard configuration")?;

    // Seed the store (application layer)
    let source = seed_source(&config);
    let records = source.load().await?;
    tracing::info!(source = source.name(), kpis = records.len(), "Loaded KPI seed");
    let store = KpiStore::new(records, config.update_interval())
        .context("KPI seed collection is invalid")?;

    let controller = DashboardController::attach(store.clone(), config.controller_settings());
    tracing::info!(simulated_updates = store.is_updating(), "KPI store ready");
    let streaming_service = StreamingService::new(store.clone());

    // Create application state
    let state = Arc::new(AppState {
        store,
        controller,
        streaming_service,
        locale: config.view.locale,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind))?;
    tracing::info!("Starting kpi-dashboard service on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    presentation::serve(listener, state, shutdown_signal()).await?;

    tracing::info!("kpi-dashboard service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
