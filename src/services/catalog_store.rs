use std::sync::{Arc, RwLock};

use crate::models::{
    Catalog, CatalogStats, Category, ChannelRecord, HomeRow, LoadStatus,
};
use crate::services::metrics;

/// Owned session state: the active catalog plus its labeled load status
///
/// The channel list is only ever swapped as a whole.
#[derive(Debug)]
pub struct CatalogStore {
    channels: RwLock<Arc<Vec<ChannelRecord>>>,
    status: RwLock<LoadStatus>,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(Arc::new(Vec::new())),
            status: RwLock::new(LoadStatus::Loading),
        }
    }

    pub fn status(&self) -> LoadStatus {
        self.status.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_status(&self, status: LoadStatus) {
        *self.status.write().unwrap_or_else(|e| e.into_inner()) = status;
    }

    fn set_channels(&self, channels: Vec<ChannelRecord>) {
        metrics::CATALOG_CHANNELS.set(i64::try_from(channels.len()).unwrap_or(i64::MAX));
        *self.channels.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(channels);
    }

    /// Mark a load as in progress; the current catalog stays until it resolves
    pub fn begin_load(&self) {
        self.set_status(LoadStatus::Loading);
    }

    /// Replace the catalog wholesale with a freshly loaded one
    pub fn replace(&self, catalog: Catalog) -> LoadStatus {
        let status = if catalog.is_empty() {
            LoadStatus::Empty {
                message: LoadStatus::EMPTY_MESSAGE.to_string(),
            }
        } else {
            LoadStatus::Ready {
                source: catalog.source,
                channels: catalog.len(),
                loaded_at: chrono::Utc::now().timestamp_millis(),
            }
        };

        self.set_channels(catalog.channels);
        self.set_status(status.clone());
        status
    }

    /// Record a total load failure; no catalog survives it
    pub fn fail(&self) -> LoadStatus {
        let status = LoadStatus::Failed {
            message: LoadStatus::FAILED_MESSAGE.to_string(),
        };

        self.set_channels(Vec::new());
        self.set_status(status.clone());
        status
    }

    /// Snapshot of the active catalog
    pub fn channels(&self) -> Arc<Vec<ChannelRecord>> {
        Arc::clone(&self.channels.read().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.channels().len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels().is_empty()
    }

    /// Channels of one category, or everything for `None`
    pub fn filter(&self, category: Option<Category>) -> Vec<ChannelRecord> {
        let channels = self.channels();
        match category {
            None => channels.as_ref().clone(),
            Some(category) => channels
                .iter()
                .filter(|c| c.category == category)
                .cloned()
                .collect(),
        }
    }

    /// Channels whose name contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Vec<ChannelRecord> {
        let query = query.trim().to_lowercase();
        let channels = self.channels();
        if query.is_empty() {
            return channels.as_ref().clone();
        }

        channels
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&query))
            .cloned()
            .collect()
    }

    /// Featured channel: first catalog entry
    pub fn hero(&self) -> Option<ChannelRecord> {
        self.channels().first().cloned()
    }

    /// Home rows (Trending, Sports, Movies, News), each capped at `limit`
    ///
    /// Rows without channels are left out.
    pub fn home_rows(&self, limit: usize) -> Vec<HomeRow> {
        let channels = self.channels();

        let row = |title: &str, keep: &dyn Fn(&ChannelRecord) -> bool| HomeRow {
            title: title.to_string(),
            channels: channels.iter().filter(|c| keep(c)).take(limit).cloned().collect(),
        };

        vec![
            row("Trending", &|c| c.is_arabic.unwrap_or(false)),
            row("Sports", &|c| c.category == Category::Sports),
            row("Movies", &|c| c.category == Category::Movies),
            row("News", &|c| c.category == Category::News),
        ]
        .into_iter()
        .filter(|r| !r.channels.is_empty())
        .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let channels = self.channels();
        let mut stats = CatalogStats {
            total: channels.len(),
            ..Default::default()
        };

        for channel in channels.iter() {
            match channel.category {
                Category::Sports => stats.sports += 1,
                Category::News => stats.news += 1,
                Category::Movies => stats.movies += 1,
                Category::Kids => stats.kids += 1,
                Category::Religious => stats.religious += 1,
                Category::Channel => stats.channel += 1,
            }
            if channel.is_arabic.unwrap_or(false) {
                stats.arabic += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogSource;

    fn channel(name: &str, category: Category, arabic: bool) -> ChannelRecord {
        ChannelRecord {
            name: name.to_string(),
            url: format!("http://stream.example/{}", name),
            category,
            is_arabic: Some(arabic),
            ..Default::default()
        }
    }

    fn sample_store() -> CatalogStore {
        let store = CatalogStore::new();
        store.replace(Catalog::new(
            CatalogSource::Primary,
            vec![
                channel("MBC Action", Category::Movies, true),
                channel("beIN Sports", Category::Sports, true),
                channel("CNN", Category::News, false),
                channel("ESPN", Category::Sports, false),
                channel("Local", Category::Channel, false),
            ],
        ));
        store
    }

    #[test]
    fn test_initial_status_is_loading() {
        let store = CatalogStore::new();
        assert_eq!(store.status(), LoadStatus::Loading);
        assert!(store.is_empty());
    }

    #[test]
    fn test_replace_sets_ready() {
        let store = sample_store();
        match store.status() {
            LoadStatus::Ready { source, channels, .. } => {
                assert_eq!(source, CatalogSource::Primary);
                assert_eq!(channels, 5);
            }
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn test_replace_is_wholesale() {
        let store = sample_store();
        let before = store.channels();

        store.replace(Catalog::new(
            CatalogSource::Fallback,
            vec![channel("Only", Category::Kids, false)],
        ));

        assert_eq!(before.len(), 5);
        assert_eq!(store.len(), 1);
        assert_eq!(store.channels()[0].name, "Only");
    }

    #[test]
    fn test_replace_with_empty_catalog() {
        let store = sample_store();
        let status = store.replace(Catalog::new(CatalogSource::Fallback, Vec::new()));

        assert_eq!(status.label(), "empty");
        assert!(store.is_empty());
    }

    #[test]
    fn test_fail_clears_catalog() {
        let store = sample_store();
        store.begin_load();
        assert_eq!(store.status(), LoadStatus::Loading);

        let status = store.fail();
        assert_eq!(status.label(), "failed");
        assert!(store.is_empty());
    }

    #[test]
    fn test_filter() {
        let store = sample_store();
        assert_eq!(store.filter(None).len(), 5);

        let sports: Vec<String> = store
            .filter(Some(Category::Sports))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(sports, vec!["beIN Sports", "ESPN"]);
        assert!(store.filter(Some(Category::Religious)).is_empty());
    }

    #[test]
    fn test_search() {
        let store = sample_store();
        assert_eq!(store.search("  ").len(), 5);

        let found = store.search("SPORT");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "beIN Sports");
    }

    #[test]
    fn test_hero_and_rows() {
        let store = sample_store();
        assert_eq!(store.hero().unwrap().name, "MBC Action");

        let rows = store.home_rows(1);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Trending", "Sports", "Movies", "News"]);
        assert!(rows.iter().all(|r| r.channels.len() == 1));
        assert_eq!(rows[1].channels[0].name, "beIN Sports");
    }

    #[test]
    fn test_rows_skip_empty() {
        let store = CatalogStore::new();
        store.replace(Catalog::new(
            CatalogSource::Fallback,
            vec![channel("CNN", Category::News, false)],
        ));

        let rows = store.home_rows(30);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "News");
    }

    #[test]
    fn test_stats() {
        let stats = sample_store().stats();
        assert_eq!(stats.total, 5);
        assert_eq!(stats.sports, 2);
        assert_eq!(stats.news, 1);
        assert_eq!(stats.movies, 1);
        assert_eq!(stats.channel, 1);
        assert_eq!(stats.arabic, 2);
    }
}
