use std::env;

/// Public playlist used when the structured catalog is unavailable
pub const DEFAULT_FALLBACK_PLAYLIST_URL: &str = "https://iptv-org.github.io/iptv/index.m3u";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,
    pub base_url: String,
    pub static_dir: String,

    // Catalog sources
    pub primary_catalog_url: String,
    pub fallback_playlist_url: String,
    pub fetch_timeout_ms: u64,

    // Rendering
    pub render_batch_size: usize,
    pub frame_interval_ms: u64,
    pub row_limit: usize,

    // Misc
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string());

        Self {
            // Server
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "frontend".to_string()),

            // Catalog sources - primary defaults to the document we serve ourselves
            primary_catalog_url: env::var("PRIMARY_CATALOG_URL").unwrap_or_else(|_| {
                format!("{}/database.json", base_url.trim_end_matches('/'))
            }),
            fallback_playlist_url: env::var("FALLBACK_PLAYLIST_URL")
                .unwrap_or_else(|_| DEFAULT_FALLBACK_PLAYLIST_URL.to_string()),
            fetch_timeout_ms: env::var("FETCH_TIMEOUT_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30_000), // 30 seconds

            // Rendering
            render_batch_size: env::var("RENDER_BATCH_SIZE")
                .unwrap_or_else(|_| "40".to_string())
                .parse::<usize>()
                .unwrap_or(40)
                .max(1),
            frame_interval_ms: env::var("FRAME_INTERVAL_MS")
                .unwrap_or_else(|_| "16".to_string())
                .parse()
                .unwrap_or(16), // ~60fps
            row_limit: env::var("ROW_LIMIT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            // Misc - Use VLC user agent to avoid IPTV server blocks
            user_agent: env::var("USER_AGENT")
                .unwrap_or_else(|_| "VLC/3.0.20 LibVLC/3.0.20".to_string()),

            base_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
