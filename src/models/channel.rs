use serde::{Deserialize, Deserializer, Serialize};

/// Coarse channel category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Sports,
    News,
    Movies,
    Kids,
    Religious,
    /// Generic catch-all; unknown labels in the source land here too
    #[serde(other)]
    Channel,
}

impl Category {
    /// All categories in classification priority order
    pub const ALL: [Category; 6] = [
        Category::Sports,
        Category::News,
        Category::Movies,
        Category::Kids,
        Category::Religious,
        Category::Channel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sports => "Sports",
            Category::News => "News",
            Category::Movies => "Movies",
            Category::Kids => "Kids",
            Category::Religious => "Religious",
            Category::Channel => "Channel",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Channel
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Single channel entry of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: Category,
    #[serde(default, alias = "current_program", skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "is_arabic", skip_serializing_if = "Option::is_none")]
    pub is_arabic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

/// Where a catalog was acquired from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Primary,
    Fallback,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Primary => write!(f, "primary"),
            CatalogSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Ordered channel list, insertion order = source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub source: CatalogSource,
    pub channels: Vec<ChannelRecord>,
}

impl Catalog {
    pub fn new(source: CatalogSource, channels: Vec<ChannelRecord>) -> Self {
        Self { source, channels }
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Request handed to the playback engine for a selected channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackRequest {
    pub name: String,
    pub url: String,
    pub logo: String,
    pub mime_type: &'static str,
}

impl PlaybackRequest {
    /// HLS mime type used for every live stream
    pub const HLS_MIME: &'static str = "application/x-mpegurl";

    pub fn for_channel(channel: &ChannelRecord) -> Self {
        Self {
            name: channel.name.clone(),
            url: channel.url.clone(),
            logo: channel.logo.clone(),
            mime_type: Self::HLS_MIME,
        }
    }
}

/// Per-category catalog statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub sports: usize,
    pub news: usize,
    pub movies: usize,
    pub kids: usize,
    pub religious: usize,
    pub channel: usize,
    pub arabic: usize,
}
