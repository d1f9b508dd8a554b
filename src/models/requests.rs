use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{Candidate, SearchableRecord, Stop, UserContext};

/// Follow list and interest labels as sent by the client
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextPayload {
    #[serde(default)]
    pub followed: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl From<ContextPayload> for UserContext {
    fn from(payload: ContextPayload) -> Self {
        UserContext::new(payload.followed, payload.labels)
    }
}

/// Request to rank a caller-supplied candidate list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankCandidatesRequest {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub context: ContextPayload,
    /// Reference time; the server clock is used when absent
    #[serde(alias = "now_millis", rename = "nowMillis", default)]
    pub now_millis: Option<i64>,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Query string for the backend-driven recommendation feed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub email: Option<String>,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to search a caller-supplied record list
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRecordsRequest {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub records: Vec<SearchableRecord>,
}

/// Query string for the backend-driven search
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchQuery {
    #[validate(length(max = 200))]
    #[serde(default)]
    pub q: String,
    #[validate(range(min = 1, max = 1000))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to order a caller-supplied stop list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortStopsRequest {
    #[serde(default)]
    pub stops: Vec<Stop>,
}

/// Query string for fetching one itinerary day
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TripDayQuery {
    #[validate(length(min = 1))]
    pub email: String,
}
