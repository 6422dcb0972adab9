use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

use crate::models::ChannelRecord;
use crate::services::classifier::CategoryClassifier;

const EXTINF_MARKER: &str = "#EXTINF:";

lazy_static! {
    /// Regex to parse EXTINF attributes (tvg-id="...", group-title="...", etc)
    static ref ATTR_REGEX: Regex = Regex::new(r#"(\w+(?:-\w+)*)="([^"]*)""#).unwrap();
}

/// Parsed EXTINF line data
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct ExtinfData {
    attributes: HashMap<String, String>,
    title: String,
}

impl ExtinfData {
    fn attribute(&self, key: &str) -> &str {
        self.attributes.get(key).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Counters collected while parsing a playlist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Metadata lines paired with a stream URL
    pub paired: usize,
    /// Metadata lines discarded for lack of a following URL
    pub dropped: usize,
}

/// Parse an EXTINF line
/// Format: #EXTINF:-1 tvg-id="..." tvg-logo="..." group-title="...",Title
///
/// The title is whatever follows the last comma.
fn parse_extinf(line: &str) -> Option<ExtinfData> {
    let content = line.strip_prefix(EXTINF_MARKER)?;

    let title = match content.rsplit_once(',') {
        Some((_, title)) => title,
        None => content,
    }
    .trim()
    .to_string();

    let attributes = ATTR_REGEX
        .captures_iter(content)
        .filter_map(|caps| {
            let key = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((key, value))
        })
        .collect();

    Some(ExtinfData { attributes, title })
}

fn is_stream_url(line: &str) -> bool {
    let prefix: String = line.chars().take(8).collect::<String>().to_ascii_lowercase();
    prefix.starts_with("http://") || prefix.starts_with("https://")
}

/// Build a classified channel record from metadata and its stream URL
fn build_record(extinf: ExtinfData, url: &str) -> ChannelRecord {
    let logo = extinf.attribute("tvg-logo");
    let group = extinf.attribute("group-title");

    let category = CategoryClassifier::classify(&extinf.title, group);
    let logo = CategoryClassifier::resolve_icon(logo, category);
    let is_arabic = CategoryClassifier::is_arabic(&extinf.title, group);

    ChannelRecord {
        name: extinf.title,
        url: url.to_string(),
        logo,
        category,
        is_arabic: Some(is_arabic),
        ..Default::default()
    }
}

/// Line-oriented M3U playlist parser
pub struct PlaylistParser;

impl PlaylistParser {
    /// Parse playlist text into channel records, in source order
    #[cfg(test)]
    pub fn parse(text: &str) -> Vec<ChannelRecord> {
        Self::parse_with_stats(text).0
    }

    /// Parse playlist text, also reporting how many entries were paired or dropped
    pub fn parse_with_stats(text: &str) -> (Vec<ChannelRecord>, ParseStats) {
        let mut channels = Vec::new();
        let mut stats = ParseStats::default();
        let mut current_extinf: Option<ExtinfData> = None;

        for line in text.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                continue;
            }

            // A new metadata line replaces a pending one that never got its URL
            if trimmed.starts_with(EXTINF_MARKER) {
                if current_extinf.is_some() {
                    stats.dropped += 1;
                }
                current_extinf = parse_extinf(trimmed);
                continue;
            }

            // Other directives (#EXTM3U, #EXTVLCOPT, ...) never break a pairing
            if trimmed.starts_with('#') {
                continue;
            }

            if let Some(extinf) = current_extinf.take() {
                if is_stream_url(trimmed) {
                    channels.push(build_record(extinf, trimmed));
                    stats.paired += 1;
                } else {
                    stats.dropped += 1;
                }
            }
        }

        if current_extinf.is_some() {
            stats.dropped += 1;
        }

        (channels, stats)
    }
}
