// Presentation layer - HTTP boundary towards the renderer
pub mod app_state;
pub mod handlers;
pub mod view_model;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    export, get_dashboard, get_kpi, get_summary, health_check, list_kpis, refresh, set_filter,
    set_theme, set_view_mode, stream_dashboard,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/summary", get(get_summary))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/filter/:filter", put(set_filter))
        .route("/dashboard/view-mode/:mode", put(set_view_mode))
        .route("/dashboard/theme/:theme", put(set_theme))
        .route("/dashboard/refresh", post(refresh))
        .route("/kpis", get(list_kpis))
        .route("/kpis/:id", get(get_kpi))
        .route("/export", get(export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `signal` resolves, then close open streams so in-flight
/// responses can finish and the state is dropped.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, signal: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let streams = state.streaming_service.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            signal.await;
            streams.shutdown();
        })
        .await
}
