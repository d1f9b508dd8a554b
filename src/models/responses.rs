use serde::{Deserialize, Serialize};
use crate::models::domain::{ScoredCandidate, SearchResult, Stop};

/// Response for the recommendation endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub posts: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Response for the search endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// A stop as shown on the itinerary screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopView {
    #[serde(flatten)]
    pub stop: Stop,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "timeRange")]
    pub time_range: String,
    #[serde(rename = "isMeal")]
    pub is_meal: bool,
}

impl From<Stop> for StopView {
    fn from(stop: Stop) -> Self {
        Self {
            display_name: stop.display_name().to_string(),
            time_range: stop.time_range_label(),
            is_meal: stop.is_meal(),
            stop,
        }
    }
}

/// Response for the stop ordering endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopsResponse {
    pub stops: Vec<StopView>,
}

impl From<Vec<Stop>> for StopsResponse {
    fn from(stops: Vec<Stop>) -> Self {
        Self {
            stops: stops.into_iter().map(StopView::from).collect(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
