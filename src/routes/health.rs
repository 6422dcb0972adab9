use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::Arc;

use crate::models::LoadStatus;
use crate::services::renderer::ViewSurface;
use crate::AppState;

/// Root endpoint - basic status
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "HMZH TV",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "runtime": "rust"
    }))
}

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    uptime: u64,
    catalog: LoadStatus,
    channels: usize,
    displayed: usize,
    rendering: bool,
}

/// GET /health - Catalog and grid health
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed().as_secs();
    let catalog = state.store.status();

    let status = match catalog {
        LoadStatus::Ready { .. } => "ok",
        LoadStatus::Loading | LoadStatus::Empty { .. } => "degraded",
        LoadStatus::Failed { .. } => "unhealthy",
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime,
        catalog,
        channels: state.store.len(),
        displayed: state.renderer.surface().len(),
        rendering: state.renderer.is_rendering(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("content-type", "text/plain")],
                b"Internal Server Error".to_vec(),
            )
        }
    }
}

/// Readiness probe: a settled catalog (ready or empty)
pub async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.store.status() {
        status if status.is_settled() => (StatusCode::OK, "ready"),
        LoadStatus::Failed { .. } => (StatusCode::SERVICE_UNAVAILABLE, "not ready - catalog failed"),
        _ => (StatusCode::SERVICE_UNAVAILABLE, "not ready - catalog loading"),
    }
}

/// Liveness probe
pub async fn live() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}
