//! Prometheus /metrics endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// GET /metrics — returns Prometheus text exposition format.
pub async fn metrics_handler(
    State(handle): State<Arc<Option<PrometheusHandle>>>,
) -> impl IntoResponse {
    match handle.as_ref() {
        Some(h) => (StatusCode::OK, h.render()),
        None => (StatusCode::NOT_FOUND, "Metrics not enabled".to_string()),
    }
}

/// Router exposing `/metrics`, merged into the main router when enabled
pub fn metrics_router(handle: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(handle))
}
