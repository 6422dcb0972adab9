use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::models::{
    Category, FilterRequest, GridResponse, PlaybackRequest, RenderResponse, SearchRequest,
};
use crate::AppState;

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// GET /api/grid - Cards currently displayed
pub async fn get_grid(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let items = state.renderer.surface().snapshot();

    Json(GridResponse {
        status: state.store.status(),
        generation: state.renderer.generation(),
        rendering: state.renderer.is_rendering(),
        total: items.len(),
        items,
    })
}

/// POST /api/filter - Render one category ("All" for the whole catalog)
pub async fn filter_grid(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<FilterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let category = if payload.category.trim().eq_ignore_ascii_case("all") {
        None
    } else {
        let category = payload
            .category
            .parse::<Category>()
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?;
        Some(category)
    };

    let list = state.store.filter(category);
    let matched = list.len();
    let handle = state.renderer.render(list);

    tracing::info!(
        "Filter {} -> {} channels (render {})",
        category.map(|c| c.as_str()).unwrap_or("All"),
        matched,
        handle.generation
    );

    Ok(Json(RenderResponse {
        generation: handle.generation,
        matched,
    }))
}

/// POST /api/search - Render channels whose name contains the query
pub async fn search_grid(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SearchRequest>,
) -> impl IntoResponse {
    let list = state.store.search(&payload.query);
    let matched = list.len();
    let handle = state.renderer.render(list);

    tracing::debug!("Search {:?} -> {} channels", payload.query, matched);

    Json(RenderResponse {
        generation: handle.generation,
        matched,
    })
}

/// POST /api/play/:position - Play the card displayed at `position`
pub async fn play(
    State(state): State<Arc<AppState>>,
    Path(position): Path<usize>,
) -> Result<impl IntoResponse, ApiError> {
    let card = state
        .renderer
        .surface()
        .card_at(position)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "No channel displayed at this position"))?;

    if card.channel.url.is_empty() {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Channel has no stream URL",
        ));
    }

    let request = PlaybackRequest::for_channel(&card.channel);
    tracing::info!("Playing {} ({})", request.name, request.url);

    Ok(Json(request))
}
