// HTTP request handlers
use crate::domain::dashboard::DashboardView;
use crate::domain::snapshot::DashboardMetrics;
use crate::infrastructure::http_response::{accepts_brotli, html_response};
use crate::presentation::app_state::AppState;
use crate::presentation::views::{render_body, render_page};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    pub is_loading: bool,
    /// Absent while loading.
    pub metrics: Option<DashboardMetrics>,
    pub updated_at: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Full dashboard page. Each request is one mount of the view.
pub async fn dashboard_page(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard_service.mount();
    let html = render_page(&view, &state.widgets);

    match html_response(html, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Body fragment for the current query state. Polled by the loading
/// skeleton; does not start a fetch of its own.
pub async fn dashboard_body(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let view = state.dashboard_service.current_view();
    let html = render_body(&view, &state.widgets);

    match html_response(html, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Derived metrics as JSON.
pub async fn dashboard_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsResponse> {
    let view = state.dashboard_service.current_view();
    let metrics = match &view {
        DashboardView::Loading(_) => None,
        DashboardView::Ready(ready) => Some(ready.metrics),
    };

    Json(MetricsResponse {
        is_loading: view.is_loading(),
        metrics,
        updated_at: state
            .dashboard_service
            .updated_at()
            .map(|at| at.to_rfc3339()),
    })
}
