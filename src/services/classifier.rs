use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Category;

/// Icon shown for any channel without a usable logo of its own
pub const DEFAULT_ICON: &str = "https://img.icons8.com/fluency/96/tv.png";

const SPORTS_ICON: &str = "https://img.icons8.com/color/96/football2--v1.png";
const NEWS_ICON: &str = "https://img.icons8.com/color/96/news.png";
const MOVIES_ICON: &str = "https://img.icons8.com/color/96/cinema-.png";
const KIDS_ICON: &str = "https://img.icons8.com/color/96/homer-simpson.png";
const RELIGIOUS_ICON: &str = "https://img.icons8.com/color/96/mosque.png";

/// Keywords marking a channel as Arabic (lowercase)
const ARABIC_KEYWORDS: [&str; 18] = [
    "arab", "jordan", "egypt", "ksa", "saudi", "uae", "dubai", "qatar", "kuwait", "lebanon",
    "palestine", "iraq", "morocco", "tunisia", "algeria", "rotana", "mbc", "bein",
];

/// One keyword group: name terms plus an optional group-title marker
pub struct CategoryRule {
    pub category: Category,
    name_pattern: Regex,
    group_marker: Option<&'static str>,
}

impl CategoryRule {
    fn new(category: Category, terms: &[&str], group_marker: Option<&'static str>) -> Self {
        let pattern = format!("(?i)({})", terms.join("|"));
        Self {
            category,
            name_pattern: Regex::new(&pattern).unwrap(),
            group_marker,
        }
    }

    /// `lower_group` must already be lowercased
    fn matches(&self, name: &str, lower_group: &str) -> bool {
        self.name_pattern.is_match(name)
            || self
                .group_marker
                .map(|marker| lower_group.contains(marker))
                .unwrap_or(false)
    }
}

lazy_static! {
    // ============ CATEGORY RULES (priority order) ============
    static ref CATEGORY_RULES: Vec<CategoryRule> = vec![
        CategoryRule::new(
            Category::Sports,
            &["sport", "soccer", "football", "koora", "bein", "espn"],
            Some("sport"),
        ),
        CategoryRule::new(
            Category::News,
            &["news", "jazeera", "arabia", "cnn", "bbc"],
            Some("news"),
        ),
        CategoryRule::new(
            Category::Movies,
            &["movie", "film", "cinema", "drama", "action"],
            Some("movie"),
        ),
        CategoryRule::new(
            Category::Kids,
            &["kid", "cartoon", "disney", "spacetoon"],
            Some("kids"),
        ),
        CategoryRule::new(Category::Religious, &["quran", "sunnah", "iqra"], None),
    ];
}

/// Heuristic channel classifier
pub struct CategoryClassifier;

impl CategoryClassifier {
    /// Classify a channel by name and group-title; first matching rule wins
    pub fn classify(name: &str, group: &str) -> Category {
        let lower_group = group.to_lowercase();

        Self::rules()
            .iter()
            .find(|rule| rule.matches(name, &lower_group))
            .map(|rule| rule.category)
            .unwrap_or_default()
    }

    /// Rules in the order they are evaluated
    pub fn rules() -> &'static [CategoryRule] {
        &CATEGORY_RULES
    }

    /// Keep an absolute http(s) logo, otherwise use the category icon
    pub fn resolve_icon(logo: &str, category: Category) -> String {
        let logo = logo.trim();
        if is_http_uri(logo) {
            return logo.to_string();
        }

        Self::category_icon(category).to_string()
    }

    pub fn category_icon(category: Category) -> &'static str {
        match category {
            Category::Sports => SPORTS_ICON,
            Category::News => NEWS_ICON,
            Category::Movies => MOVIES_ICON,
            Category::Kids => KIDS_ICON,
            Category::Religious => RELIGIOUS_ICON,
            Category::Channel => DEFAULT_ICON,
        }
    }

    /// Detect Arabic channels from name and group-title
    pub fn is_arabic(name: &str, group: &str) -> bool {
        let combined = format!("{} {}", name, group).to_lowercase();
        ARABIC_KEYWORDS.iter().any(|key| combined.contains(key))
    }
}

fn is_http_uri(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }

    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_name() {
        assert_eq!(CategoryClassifier::classify("beIN Sports 1", ""), Category::Sports);
        assert_eq!(CategoryClassifier::classify("Al Jazeera", ""), Category::News);
        assert_eq!(CategoryClassifier::classify("Rotana Cinema", ""), Category::Movies);
        assert_eq!(CategoryClassifier::classify("Spacetoon", ""), Category::Kids);
        assert_eq!(CategoryClassifier::classify("Quran TV", ""), Category::Religious);
    }

    #[test]
    fn test_classify_priority_order() {
        // sports before news
        assert_eq!(CategoryClassifier::classify("Sport News 24", ""), Category::Sports);
        // news before movies ("arabia" + "drama")
        assert_eq!(CategoryClassifier::classify("Arabia Drama", ""), Category::News);
        // movies before kids
        assert_eq!(CategoryClassifier::classify("Disney Movies", ""), Category::Movies);
    }

    #[test]
    fn test_classify_default() {
        assert_eq!(CategoryClassifier::classify("Random Channel", ""), Category::Channel);
        assert_eq!(CategoryClassifier::classify("", ""), Category::Channel);
    }

    #[test]
    fn test_classify_by_group_marker() {
        assert_eq!(CategoryClassifier::classify("Canal 5", "Sports;General"), Category::Sports);
        assert_eq!(CategoryClassifier::classify("TV One", "NEWS"), Category::News);
        assert_eq!(CategoryClassifier::classify("Star", "Movies"), Category::Movies);
        assert_eq!(CategoryClassifier::classify("Toon", "Kids"), Category::Kids);
        // "kid" alone is a name term, not a group marker
        assert_eq!(CategoryClassifier::classify("Toon", "Kid"), Category::Channel);
        // religious has no group marker
        assert_eq!(CategoryClassifier::classify("Channel 9", "Religious"), Category::Channel);
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(
            CategoryClassifier::classify("ESPN", ""),
            CategoryClassifier::classify("espn", "")
        );
        assert_eq!(CategoryClassifier::classify("CARTOON net", ""), Category::Kids);
    }

    #[test]
    fn test_rules_order() {
        let order: Vec<Category> = CategoryClassifier::rules().iter().map(|r| r.category).collect();
        assert_eq!(
            order,
            vec![
                Category::Sports,
                Category::News,
                Category::Movies,
                Category::Kids,
                Category::Religious
            ]
        );
    }

    #[test]
    fn test_resolve_icon() {
        assert_eq!(CategoryClassifier::resolve_icon("", Category::Kids), KIDS_ICON);
        assert_eq!(
            CategoryClassifier::resolve_icon("http://x/logo.png", Category::Kids),
            "http://x/logo.png"
        );
        assert_eq!(
            CategoryClassifier::resolve_icon("https://cdn.example/a.png", Category::News),
            "https://cdn.example/a.png"
        );
        assert_eq!(CategoryClassifier::resolve_icon("logo.png", Category::Sports), SPORTS_ICON);
        assert_eq!(
            CategoryClassifier::resolve_icon("ftp://x/logo.png", Category::Channel),
            DEFAULT_ICON
        );
    }

    #[test]
    fn test_resolve_icon_trims_logo() {
        assert_eq!(
            CategoryClassifier::resolve_icon(" http://x/a.png ", Category::News),
            "http://x/a.png"
        );
        assert_eq!(CategoryClassifier::resolve_icon("   ", Category::Kids), KIDS_ICON);
    }

    #[test]
    fn test_is_arabic() {
        assert!(CategoryClassifier::is_arabic("MBC 1", ""));
        assert!(CategoryClassifier::is_arabic("Channel 1", "Saudi Arabia"));
        assert!(!CategoryClassifier::is_arabic("CNN International", "News"));
    }
}
