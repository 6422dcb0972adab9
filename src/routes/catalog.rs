use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

use crate::models::{HomeResponse, StatsResponse};
use crate::AppState;

/// GET /api/status - Labeled catalog load status
pub async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.store.status())
}

/// GET /api/rows - Hero channel and home rows
pub async fn get_rows(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HomeResponse {
        hero: state.store.hero(),
        rows: state.store.home_rows(state.config.row_limit),
    })
}

/// GET /api/stats - Per-category catalog counts
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatsResponse {
        status: state.store.status(),
        stats: state.store.stats(),
    })
}

/// POST /api/reload - Re-run the catalog load in the background
///
/// This is the only recovery path after a failed load.
pub async fn reload(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let state_clone = state.clone();

    tokio::spawn(async move {
        tracing::info!("Catalog reload requested");
        let (status, handle) = state_clone
            .loader
            .load_and_render(&state_clone.store, &state_clone.renderer)
            .await;
        tracing::info!("Catalog reload finished: {}", status.label());
        handle.finished().await;
    });

    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "loading" })),
    )
}
