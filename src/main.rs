mod config;
mod models;
mod routes;
mod services;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{
    catalog_loader::CatalogLoader,
    catalog_store::CatalogStore,
    renderer::{GridView, ProgressiveRenderer},
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub store: CatalogStore,
    pub loader: CatalogLoader,
    pub renderer: ProgressiveRenderer<GridView>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let loader = CatalogLoader::from_config(&config)?;
        let renderer = ProgressiveRenderer::new(
            Arc::new(GridView::new()),
            config.render_batch_size,
            Duration::from_millis(config.frame_interval_ms),
        );

        Ok(Self {
            config,
            store: CatalogStore::new(),
            loader,
            renderer,
            start_time: Instant::now(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hmzh_tv=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;

    tracing::info!("Starting HMZH TV v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Primary catalog: {}", config.primary_catalog_url);
    tracing::info!("Fallback playlist: {}", config.fallback_playlist_url);
    tracing::info!("Serving static files from {}", config.static_dir);

    let state = Arc::new(AppState::new(config)?);

    let app = routes::router(state.clone());

    // Bind before loading so the primary catalog we serve ourselves is reachable
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    // Initial catalog load (runs in background)
    let load_state = state.clone();
    tokio::spawn(async move {
        let (status, handle) = load_state
            .loader
            .load_and_render(&load_state.store, &load_state.renderer)
            .await;
        tracing::info!("Initial catalog load: {}", status.label());
        handle.finished().await;
    });

    axum::serve(listener, app).await?;

    Ok(())
}
