// HTTP request handlers
use crate::application::dashboard_controller::EXPORT_FILE_NAME;
use crate::domain::error::ParseError;
use crate::domain::kpi::{KpiId, KpiRecord, KpiType};
use crate::domain::summary::SummaryStats;
use crate::domain::view::{KpiFilter, Theme, ViewMode};
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, attachment_response, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::view_model::DashboardView;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct StreamQuery {
    pub filter: Option<String>,
}

#[derive(Deserialize)]
pub struct KpiListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

fn bad_request(e: ParseError) -> (StatusCode, String) {
    tracing::debug!("Rejected selection: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn current_view(state: &AppState) -> DashboardView {
    DashboardView::new(state.controller.snapshot(), state.locale)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Filtered cards plus selection state and summary
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match json_response(&current_view(&state), accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryStats> {
    Json(state.controller.summary())
}

/// Whole collection, or only the records of one type
pub async fn list_kpis(
    Query(query): Query<KpiListQuery>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<KpiRecord>>, (StatusCode, String)> {
    match query.kind {
        None => Ok(Json(state.store.get_all().to_vec())),
        Some(kind) => {
            let kind: KpiType = kind.parse().map_err(bad_request)?;
            Ok(Json(state.store.by_type(kind)))
        }
    }
}

/// Look up a single KPI by its stable id
pub async fn get_kpi(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<KpiRecord>, StatusCode> {
    state
        .store
        .get(&KpiId::new(id))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn set_filter(
    Path(filter): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, (StatusCode, String)> {
    let filter: KpiFilter = filter.parse().map_err(bad_request)?;
    state.controller.set_filter(filter);
    Ok(Json(current_view(&state)))
}

pub async fn set_view_mode(
    Path(mode): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, (StatusCode, String)> {
    let mode: ViewMode = mode.parse().map_err(bad_request)?;
    state.controller.set_view_mode(mode);
    Ok(Json(current_view(&state)))
}

pub async fn set_theme(
    Path(theme): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardView>, (StatusCode, String)> {
    let theme: Theme = theme.parse().map_err(bad_request)?;
    state.controller.set_theme(theme);
    Ok(Json(current_view(&state)))
}

/// Schedule a delayed reload; the view reports `isLoading` until it runs
pub async fn refresh(State(state): State<Arc<AppState>>) -> StatusCode {
    // Detached: the reload task outlives the request
    let _ = state.controller.refresh();
    StatusCode::ACCEPTED
}

/// Download the full collection as pretty-printed JSON
pub async fn export(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let body = match state.controller.export() {
        Ok(body) => body,
        Err(e) => {
            tracing::error!("Error exporting KPI collection: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match attachment_response(body, EXPORT_FILE_NAME, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Stream collection updates as length-prefixed JSON chunks
pub async fn stream_dashboard(
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let filter = match query.filter.as_deref().map(str::parse::<KpiFilter>) {
        None => KpiFilter::All,
        Some(Ok(filter)) => filter,
        Some(Err(e)) => return bad_request(e).into_response(),
    };

    let rx = state.streaming_service.stream_updates(filter);
    stream_from_receiver(rx, accepts_brotli(&headers))
        .await
        .into_response()
}
