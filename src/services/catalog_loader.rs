//! Catalog acquisition
//!
//! Plan A fetches the structured catalog document. When that is unavailable
//! for any reason (network, status, malformed or empty payload), plan B
//! fetches the public M3U playlist and builds the catalog with the playlist
//! parser. Only a failure of plan B is surfaced.

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::models::{Catalog, CatalogSource, ChannelRecord, LoadStatus};
use crate::services::catalog_store::CatalogStore;
use crate::services::m3u_parser::PlaylistParser;
use crate::services::metrics;
use crate::services::renderer::{ProgressiveRenderer, RenderHandle, ViewSurface};

/// Failure fetching a single source
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/connection error
    #[error("Network error: {0}")]
    Network(String),
    /// HTTP error (non-2xx status)
    #[error("HTTP error: {0}")]
    Http(u16),
    /// Body is not the expected structure
    #[error("Parse error: {0}")]
    Parse(String),
    /// Catalog document holds no channels
    #[error("Empty catalog")]
    EmptyCatalog,
}

/// Failure of a whole load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("All catalog sources failed (fallback: {fallback})")]
    AllSourcesFailed { fallback: FetchError },
}

/// Fetches the catalog from the primary document or the fallback playlist
pub struct CatalogLoader {
    client: Client,
    primary_url: String,
    fallback_url: String,
}

impl CatalogLoader {
    pub fn new(
        primary_url: &str,
        fallback_url: &str,
        user_agent: &str,
        timeout_ms: u64,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_millis(timeout_ms))
            .gzip(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            primary_url: primary_url.to_string(),
            fallback_url: fallback_url.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.primary_catalog_url,
            &config.fallback_playlist_url,
            &config.user_agent,
            config.fetch_timeout_ms,
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))
    }

    /// Plan A: structured catalog document, must be a non-empty array
    pub async fn fetch_primary(&self) -> Result<Vec<ChannelRecord>, FetchError> {
        let text = self.get_text(&self.primary_url).await?;

        let channels: Vec<ChannelRecord> = serde_json::from_str(&text).map_err(|e| {
            let preview: String = text.chars().take(200).collect();
            tracing::debug!("Primary catalog body: {}", preview);
            FetchError::Parse(e.to_string())
        })?;

        if channels.is_empty() {
            return Err(FetchError::EmptyCatalog);
        }

        Ok(channels)
    }

    /// Plan B: raw playlist text
    pub async fn fetch_fallback(&self) -> Result<String, FetchError> {
        self.get_text(&self.fallback_url).await
    }

    /// Acquire a catalog, falling back to the playlist when plan A is unavailable
    pub async fn load(&self) -> Result<Catalog, LoadError> {
        match self.fetch_primary().await {
            Ok(channels) => {
                tracing::info!("Plan A: catalog loaded ({} channels)", channels.len());
                metrics::CATALOG_LOADS_TOTAL.with_label_values(&["primary"]).inc();
                return Ok(Catalog::new(CatalogSource::Primary, channels));
            }
            Err(e) => {
                tracing::warn!("Plan A failed ({}), falling back to playlist scraper", e);
            }
        }

        let text = match self.fetch_fallback().await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Plan B failed: {}", e);
                metrics::CATALOG_LOADS_TOTAL.with_label_values(&["failed"]).inc();
                return Err(LoadError::AllSourcesFailed { fallback: e });
            }
        };

        let (channels, stats) = PlaylistParser::parse_with_stats(&text);
        tracing::info!(
            "Plan B: {} channels scraped ({} entries dropped)",
            stats.paired,
            stats.dropped
        );
        metrics::CATALOG_LOADS_TOTAL.with_label_values(&["fallback"]).inc();

        Ok(Catalog::new(CatalogSource::Fallback, channels))
    }

    /// Full load sequence: label as loading, load, replace the catalog, render
    ///
    /// Every path ends in a labeled status and a render (an empty grid on
    /// failure).
    pub async fn load_and_render<V: ViewSurface>(
        &self,
        store: &CatalogStore,
        renderer: &ProgressiveRenderer<V>,
    ) -> (LoadStatus, RenderHandle) {
        store.begin_load();

        let status = match self.load().await {
            Ok(catalog) => store.replace(catalog),
            Err(e) => {
                tracing::error!("Catalog load failed: {}", e);
                store.fail()
            }
        };

        let handle = renderer.render(store.channels().as_ref().clone());
        (status, handle)
    }
}
