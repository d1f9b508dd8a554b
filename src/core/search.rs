use crate::models::{SearchResult, SearchWeights, SearchableRecord};

/// Search tuning: the generic keyword tier, display placeholders and weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Word that admits records containing it as a lower-priority match
    /// whenever the query also contains it. Empty disables that tier.
    pub generic_keyword: String,
    pub untitled_placeholder: String,
    pub uncategorized_placeholder: String,
    pub subtitle_prefix: String,
    pub weights: SearchWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            generic_keyword: "地圖".to_string(),
            untitled_placeholder: "(未命名地圖)".to_string(),
            uncategorized_placeholder: "未分類".to_string(),
            subtitle_prefix: "分類：".to_string(),
            weights: SearchWeights::default(),
        }
    }
}

/// A kept record with its sort keys
#[derive(Debug)]
struct Weighted {
    result: SearchResult,
    score: i64,
    position_boost: i64,
    created_at_millis: i64,
}

/// Character offset of the first occurrence of `needle` in `haystack`
#[inline]
fn char_index_of(haystack: &str, needle: &str) -> Option<i64> {
    haystack
        .find(needle)
        .map(|byte_idx| haystack[..byte_idx].chars().count() as i64)
}

/// Boost for a hit at `index`, larger the earlier it occurs, within `[0, window]`
#[inline]
fn position_boost(index: i64, window: i64) -> i64 {
    (window - index).clamp(0, window.max(0))
}

/// Filters and orders map posts against a free-text query
///
/// # Tiers
/// 1. Full hit: the query occurs in the title or the category
/// 2. Generic hit: the query contains the generic keyword, the record has no
///    full hit, but its title or category contains the keyword
///
/// Everything else is dropped.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    config: SearchConfig,
    keyword: String,
}

impl SearchMatcher {
    pub fn new(config: SearchConfig) -> Self {
        let keyword = config.generic_keyword.trim().to_lowercase();
        Self { config, keyword }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run a query against the records, best match first
    pub fn search(&self, query: &str, records: &[SearchableRecord]) -> Vec<SearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let query_lower = query.to_lowercase();
        let query_has_keyword = !self.keyword.is_empty() && query_lower.contains(&self.keyword);

        let mut weighted: Vec<Weighted> = records
            .iter()
            .filter_map(|record| self.weigh(record, &query_lower, query_has_keyword))
            .collect();

        weighted.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.position_boost.cmp(&a.position_boost))
                .then_with(|| b.created_at_millis.cmp(&a.created_at_millis))
        });

        weighted.into_iter().map(|w| w.result).collect()
    }

    fn weigh(
        &self,
        record: &SearchableRecord,
        query_lower: &str,
        query_has_keyword: bool,
    ) -> Option<Weighted> {
        let weights = &self.config.weights;
        let title = record.title.to_lowercase();
        let category = record.category.to_lowercase();

        let title_hit = char_index_of(&title, query_lower);
        let category_hit = char_index_of(&category, query_lower);
        let has_full_hit = title_hit.is_some() || category_hit.is_some();

        let generic_only = query_has_keyword
            && !has_full_hit
            && (title.contains(&self.keyword) || category.contains(&self.keyword));

        if !has_full_hit && !generic_only {
            return None;
        }

        let mut score = 0;
        let mut boost = 0;

        if let Some(idx) = title_hit {
            score += weights.title_hit;
            boost += position_boost(idx, weights.title_position_window);
        }
        if let Some(idx) = category_hit {
            score += weights.category_hit;
            boost += position_boost(idx, weights.category_position_window);
        }

        if generic_only {
            let (idx, hit) = match char_index_of(&title, &self.keyword) {
                Some(idx) => (idx, weights.generic_title_hit),
                None => (
                    char_index_of(&category, &self.keyword).unwrap_or(0),
                    weights.generic_category_hit,
                ),
            };
            score += hit;
            boost += position_boost(idx, weights.generic_position_window);
        }

        Some(Weighted {
            result: self.present(record),
            score,
            position_boost: boost,
            created_at_millis: record.created_at_millis,
        })
    }

    fn present(&self, record: &SearchableRecord) -> SearchResult {
        let title = if record.title.trim().is_empty() {
            self.config.untitled_placeholder.clone()
        } else {
            record.title.clone()
        };

        let category = if record.category.trim().is_empty() {
            self.config.uncategorized_placeholder.as_str()
        } else {
            record.category.as_str()
        };

        SearchResult {
            id: record.id.clone(),
            title,
            subtitle: format!("{}{}", self.config.subtitle_prefix, category),
        }
    }
}

impl Default for SearchMatcher {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str, category: &str, created_at: i64) -> SearchableRecord {
        SearchableRecord {
            id: id.to_string(),
            owner: "owner@x.com".to_string(),
            title: title.to_string(),
            category: category.to_string(),
            created_at_millis: created_at,
        }
    }

    fn ids(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_blank_query() {
        let matcher = SearchMatcher::default();
        let records = vec![record("1", "台北地圖", "觀光", 0)];

        assert!(matcher.search("", &records).is_empty());
        assert!(matcher.search("   ", &records).is_empty());
    }

    #[test]
    fn test_keyword_normalised() {
        let matcher = SearchMatcher::new(SearchConfig {
            generic_keyword: " MAP ".to_string(),
            ..SearchConfig::default()
        });
        assert_eq!(matcher.keyword, "map");
    }

    #[test]
    fn test_char_index_of_counts_characters() {
        assert_eq!(char_index_of("台北地圖", "地圖"), Some(2));
        assert_eq!(char_index_of("abc", "c"), Some(2));
        assert_eq!(char_index_of("abc", "z"), None);
    }

    #[test]
    fn test_position_boost_bounds() {
        assert_eq!(position_boost(0, 100), 100);
        assert_eq!(position_boost(30, 100), 70);
        assert_eq!(position_boost(150, 100), 0);
    }

    #[test]
    fn test_full_hits_both_fields() {
        let matcher = SearchMatcher::default();
        let records = vec![
            record("1", "台北地圖", "觀光", 0),
            record("2", "美食清單", "地圖分類", 0),
        ];

        let results = matcher.search("地圖", &records);

        // Title hit (200) outranks category hit (180)
        assert_eq!(ids(&results), vec!["1", "2"]);

        // Both score through the full-hit branches, never the generic tier
        let title = matcher.weigh(&records[0], "地圖", true).unwrap();
        assert_eq!(title.score, 200);
        assert_eq!(title.position_boost, 98);

        let category = matcher.weigh(&records[1], "地圖", true).unwrap();
        assert_eq!(category.score, 180);
        assert_eq!(category.position_boost, 60);
    }

    #[test]
    fn test_no_hit_excluded() {
        let matcher = SearchMatcher::default();
        let records = vec![record("1", "台北美食", "餐廳", 0)];

        assert!(matcher.search("地圖", &records).is_empty());
    }

    #[test]
    fn test_generic_keyword_tier() {
        let matcher = SearchMatcher::default();
        let records = vec![
            record("generic", "高雄地圖", "觀光", 0),
            record("full", "台南美食地圖", "小吃", 0),
            record("none", "高雄", "觀光", 0),
        ];

        let results = matcher.search("美食地圖", &records);
        assert_eq!(ids(&results), vec!["full", "generic"]);
    }

    #[test]
    fn test_generic_tier_requires_keyword_in_query() {
        let matcher = SearchMatcher::default();
        let records = vec![record("1", "高雄地圖", "觀光", 0)];

        assert!(matcher.search("台南", &records).is_empty());
    }

    #[test]
    fn test_generic_title_beats_generic_category() {
        let matcher = SearchMatcher::default();
        let records = vec![
            record("cat", "高雄", "地圖", 0),
            record("title", "高雄地圖", "觀光", 0),
        ];

        let results = matcher.search("台南地圖", &records);
        assert_eq!(ids(&results), vec!["title", "cat"]);
    }

    #[test]
    fn test_earlier_position_wins_then_newer() {
        let matcher = SearchMatcher::default();
        let records = vec![
            record("late", "my taipei trip", "", 10),
            record("early", "taipei trip", "", 1),
            record("early-new", "taipei eats", "", 5),
        ];

        let results = matcher.search("Taipei", &records);
        assert_eq!(ids(&results), vec!["early-new", "early", "late"]);
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = SearchMatcher::default();
        let records = vec![record("1", "Tokyo Cafés", "FOOD", 0)];

        assert_eq!(matcher.search("food", &records).len(), 1);
        assert_eq!(matcher.search("TOKYO", &records).len(), 1);
    }

    #[test]
    fn test_placeholders() {
        let matcher = SearchMatcher::default();
        let records = vec![
            record("1", "", "地圖", 0),
            record("2", "地圖集", "", 0),
        ];

        let results = matcher.search("地圖", &records);
        let untitled = results.iter().find(|r| r.id == "1").unwrap();
        assert_eq!(untitled.title, "(未命名地圖)");
        assert_eq!(untitled.subtitle, "分類：地圖");

        let uncategorized = results.iter().find(|r| r.id == "2").unwrap();
        assert_eq!(uncategorized.subtitle, "分類：未分類");
    }

    #[test]
    fn test_empty_keyword_disables_generic_tier() {
        let matcher = SearchMatcher::new(SearchConfig {
            generic_keyword: String::new(),
            ..SearchConfig::default()
        });
        let records = vec![record("1", "高雄地圖", "觀光", 0)];

        assert!(matcher.search("台南地圖", &records).is_empty());
    }

    #[test]
    fn test_configurable_keyword() {
        let matcher = SearchMatcher::new(SearchConfig {
            generic_keyword: "Map".to_string(),
            ..SearchConfig::default()
        });
        let records = vec![record("1", "Kyoto map", "sights", 0)];

        assert_eq!(ids(&matcher.search("food map", &records)), vec!["1"]);
    }
}
