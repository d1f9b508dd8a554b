use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Accept `null` wherever the backend may omit a string field
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A public map post that can be recommended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(rename = "ownerEmail", default, deserialize_with = "nullable_string")]
    pub owner: String,
    #[serde(rename = "mapName", default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "mapType", default, deserialize_with = "nullable_string")]
    pub category: String,
    #[serde(rename = "createdAtMillis", default)]
    pub created_at_millis: i64,
    #[serde(default)]
    pub likes: i64,
}

/// Per-request personalisation context for the recommendation pass
///
/// Labels are stored lowercase and non-empty; construct through
/// [`UserContext::new`] or `core::labels` to keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    pub followed: HashSet<String>,
    pub labels: HashSet<String>,
}

impl UserContext {
    pub fn new<F, L>(followed: F, labels: L) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        Self {
            followed: followed
                .into_iter()
                .map(|email| Into::<String>::into(email).trim().to_string())
                .filter(|email| !email.is_empty())
                .collect(),
            labels: labels
                .into_iter()
                .map(|label| label.as_ref().trim().to_lowercase())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.followed.is_empty() && self.labels.is_empty()
    }

    pub fn follows(&self, owner: &str) -> bool {
        self.followed.contains(owner)
    }
}

/// Candidate annotated with its recommendation score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: i64,
}

/// A map post as returned by the backend search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchableRecord {
    pub id: String,
    #[serde(rename = "ownerEmail", default, deserialize_with = "nullable_string")]
    pub owner: String,
    #[serde(rename = "mapName", default, deserialize_with = "nullable_string")]
    pub title: String,
    #[serde(rename = "mapType", default, deserialize_with = "nullable_string")]
    pub category: String,
    #[serde(rename = "createdAtMillis", default)]
    pub created_at_millis: i64,
}

/// Display-ready search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub subtitle: String,
}

/// A single stop on one day of a trip itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "startTime", default, deserialize_with = "nullable_string")]
    pub start_time: String,
    #[serde(rename = "endTime", default, deserialize_with = "nullable_string")]
    pub end_time: String,
    #[serde(rename = "aiSuggestion", default, deserialize_with = "nullable_string")]
    pub ai_suggestion: String,
    #[serde(default = "default_stop_category", deserialize_with = "nullable_string")]
    pub category: String,
    #[serde(rename = "createdAtMillis", default)]
    pub created_at_millis: i64,
}

fn default_stop_category() -> String {
    "景點".to_string()
}

/// Profile fields the recommendation context is derived from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(rename = "userName", default, deserialize_with = "nullable_string")]
    pub user_name: String,
    #[serde(rename = "userLabel", default, deserialize_with = "nullable_string")]
    pub user_label: String,
}

/// A user the current account follows
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowUser {
    #[serde(default, deserialize_with = "nullable_string")]
    pub email: String,
    #[serde(rename = "userName", default, deserialize_with = "nullable_string")]
    pub user_name: String,
}

/// Recommendation scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingWeights {
    pub follow_bonus: i64,
    pub category_label_hit: i64,
    pub title_label_hit: i64,
    pub popularity_cap: i64,
    pub recency_max: i64,
    pub recency_decay_per_day: i64,
    /// Age assumed for posts without a creation timestamp
    pub unknown_age_days: i64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            follow_bonus: 300,
            category_label_hit: 200,
            title_label_hit: 120,
            popularity_cap: 100,
            recency_max: 120,
            recency_decay_per_day: 4,
            unknown_age_days: 999,
        }
    }
}

/// Search scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWeights {
    pub title_hit: i64,
    pub title_position_window: i64,
    pub category_hit: i64,
    pub category_position_window: i64,
    pub generic_title_hit: i64,
    pub generic_category_hit: i64,
    pub generic_position_window: i64,
}

impl Default for SearchWeights {
    fn default() -> Self {
        Self {
            title_hit: 200,
            title_position_window: 100,
            category_hit: 180,
            category_position_window: 60,
            generic_title_hit: 60,
            generic_category_hit: 50,
            generic_position_window: 20,
        }
    }
}
