pub mod catalog;
pub mod grid;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Health endpoints
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/metrics", get(health::metrics))
        .route("/ready", get(health::ready))
        .route("/live", get(health::live))
        // Catalog endpoints
        .route("/api/status", get(catalog::get_status))
        .route("/api/rows", get(catalog::get_rows))
        .route("/api/stats", get(catalog::get_stats))
        .route("/api/reload", post(catalog::reload))
        // Grid endpoints
        .route("/api/grid", get(grid::get_grid))
        .route("/api/filter", post(grid::filter_grid))
        .route("/api/search", post(grid::search_grid))
        .route("/api/play/:position", post(grid::play))
        // Static files (serves the primary catalog document)
        .fallback_service(static_files)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{Catalog, CatalogSource, Category, ChannelRecord};
    use crate::services::renderer::ViewSurface;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let mut config = Config::from_env();
        config.primary_catalog_url = "http://127.0.0.1:9/database.json".to_string();
        config.fallback_playlist_url = "http://127.0.0.1:9/index.m3u".to_string();
        config.frame_interval_ms = 1;
        config.render_batch_size = 40;
        Arc::new(AppState::new(config).unwrap())
    }

    fn load_sample(state: &AppState) {
        let channels = vec![
            ChannelRecord {
                name: "beIN Sports".to_string(),
                url: "https://stream.example/bein.m3u8".to_string(),
                category: Category::Sports,
                is_arabic: Some(true),
                ..Default::default()
            },
            ChannelRecord {
                name: "CNN".to_string(),
                url: "https://stream.example/cnn.m3u8".to_string(),
                category: Category::News,
                ..Default::default()
            },
        ];
        state.store.replace(Catalog::new(CatalogSource::Primary, channels));
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    async fn wait_for_render(state: &AppState) {
        while state.renderer.is_rendering() {
            tokio::time::sleep(std::time::Duration::from_millis(1)).await;
        }
    }

    #[tokio::test]
    async fn test_status_starts_loading() {
        let state = test_state();
        let (status, body) = send(router(state), "GET", "/api/status", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "loading");
    }

    #[tokio::test]
    async fn test_ready_probe_follows_status() {
        let state = test_state();
        let (status, _) = send(router(state.clone()), "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        load_sample(&state);
        let (status, _) = send(router(state), "GET", "/ready", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_filter_renders_category() {
        let state = test_state();
        load_sample(&state);

        let (status, body) = send(
            router(state.clone()),
            "POST",
            "/api/filter",
            Some(r#"{"category": "News"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched"], 1);

        wait_for_render(&state).await;
        let (_, grid) = send(router(state), "GET", "/api/grid", None).await;
        assert_eq!(grid["total"], 1);
        assert_eq!(grid["items"][0]["name"], "CNN");
        assert_eq!(grid["status"]["state"], "ready");
    }

    #[tokio::test]
    async fn test_filter_all_and_unknown() {
        let state = test_state();
        load_sample(&state);

        let (_, body) = send(router(state.clone()), "POST", "/api/filter", Some(r#"{"category": "All"}"#)).await;
        assert_eq!(body["matched"], 2);

        let (status, body) =
            send(router(state), "POST", "/api/filter", Some(r#"{"category": "Weather"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Weather"));
    }

    #[tokio::test]
    async fn test_search_then_play() {
        let state = test_state();
        load_sample(&state);

        let (_, body) = send(router(state.clone()), "POST", "/api/search", Some(r#"{"query": "bein"}"#)).await;
        assert_eq!(body["matched"], 1);
        wait_for_render(&state).await;
        assert_eq!(state.renderer.surface().len(), 1);

        let (status, body) = send(router(state.clone()), "POST", "/api/play/0", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["url"], "https://stream.example/bein.m3u8");
        assert_eq!(body["mimeType"], "application/x-mpegurl");

        let (status, _) = send(router(state), "POST", "/api/play/5", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rows_and_stats() {
        let state = test_state();
        load_sample(&state);

        let (_, rows) = send(router(state.clone()), "GET", "/api/rows", None).await;
        assert_eq!(rows["hero"]["name"], "beIN Sports");
        assert_eq!(rows["rows"][0]["title"], "Trending");

        let (_, stats) = send(router(state), "GET", "/api/stats", None).await;
        assert_eq!(stats["stats"]["total"], 2);
        assert_eq!(stats["stats"]["sports"], 1);
    }

    #[tokio::test]
    async fn test_reload_with_unreachable_sources_fails() {
        let state = test_state();
        load_sample(&state);

        let (status, _) = send(router(state.clone()), "POST", "/api/reload", None).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let mut label = state.store.status().label();
        for _ in 0..500 {
            if label == "failed" {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            label = state.store.status().label();
        }

        assert_eq!(label, "failed");
        assert!(state.store.is_empty());
    }
}
