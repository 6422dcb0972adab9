use serde::{Deserialize, Serialize};

use super::channel::{CatalogSource, CatalogStats, Category, ChannelRecord};

/// Labeled state of the catalog load, shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    #[serde(rename_all = "camelCase")]
    Ready {
        source: CatalogSource,
        channels: usize,
        loaded_at: i64,
    },
    Empty {
        message: String,
    },
    Failed {
        message: String,
    },
}

impl LoadStatus {
    pub const EMPTY_MESSAGE: &'static str = "No channels available.";
    pub const FAILED_MESSAGE: &'static str = "Complete system failure. Check internet connection.";

    pub fn label(&self) -> &'static str {
        match self {
            LoadStatus::Loading => "loading",
            LoadStatus::Ready { .. } => "ready",
            LoadStatus::Empty { .. } => "empty",
            LoadStatus::Failed { .. } => "failed",
        }
    }

    /// Whether the load reached a terminal state the UI can work with
    pub fn is_settled(&self) -> bool {
        matches!(self, LoadStatus::Ready { .. } | LoadStatus::Empty { .. })
    }
}

/// Materialized, selectable view element for one channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCard {
    pub position: usize,
    pub name: String,
    pub logo: String,
    /// Shown when `logo` fails to load
    pub fallback_logo: &'static str,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(skip)]
    pub channel: ChannelRecord,
}

/// One browsable home row
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeRow {
    pub title: String,
    pub channels: Vec<ChannelRecord>,
}

/// Home screen: hero channel plus rows
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<ChannelRecord>,
    pub rows: Vec<HomeRow>,
}

/// Currently displayed grid
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub status: LoadStatus,
    pub generation: u64,
    pub rendering: bool,
    pub total: usize,
    pub items: Vec<ChannelCard>,
}

/// Request to filter the grid by category ("All" resets)
#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub category: String,
}

/// Request to search the grid by channel name
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

/// Response after a filter/search triggered a render
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub generation: u64,
    pub matched: usize,
}

/// Catalog stats response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub status: LoadStatus,
    pub stats: CatalogStats,
}
