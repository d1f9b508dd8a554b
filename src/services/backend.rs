use crate::models::{Candidate, FollowUser, ProfileRecord, SearchableRecord, Stop};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the map-collection backend
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the map-collection REST API
///
/// Covers the read paths the ranking layer consumes:
/// - public posts for recommendations
/// - keyword search over posts
/// - the caller's profile labels and follow list
/// - the stops of one itinerary day
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET a JSON resource and decode it
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, BackendError> {
        let url = self.url(path);
        tracing::debug!("Fetching {} from: {}", what, url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("{} ({})", what, path)));
        }

        if status == StatusCode::FORBIDDEN {
            return Err(BackendError::Forbidden(format!("{} ({})", what, path)));
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch {}: {} - {}", what, status, body);
            return Err(BackendError::ApiError(format!(
                "Failed to fetch {}: {}",
                what, status
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BackendError::InvalidResponse(format!("Failed to parse {}: {}", what, e)))
    }

    /// Fetch the most recent public posts
    pub async fn get_public_posts(&self, limit: u16) -> Result<Vec<Candidate>, BackendError> {
        let posts: Vec<Candidate> = self
            .get_json("posts/public", &[("limit", limit.to_string())], "public posts")
            .await?;

        tracing::debug!("Fetched {} public posts", posts.len());
        Ok(posts)
    }

    /// Server-side keyword search over posts
    pub async fn search_posts(&self, q: &str, limit: u16) -> Result<Vec<SearchableRecord>, BackendError> {
        let records: Vec<SearchableRecord> = self
            .get_json(
                "posts/search",
                &[("q", q.to_string()), ("limit", limit.to_string())],
                "search results",
            )
            .await?;

        tracing::debug!("Search '{}' returned {} records", q, records.len());
        Ok(records)
    }

    /// Fetch the profile of the signed-in user
    pub async fn get_profile(&self, email: &str) -> Result<ProfileRecord, BackendError> {
        self.get_json("me/profile", &[("email", email.to_string())], "profile")
            .await
    }

    /// Fetch the users the signed-in user follows
    pub async fn get_following(&self, email: &str) -> Result<Vec<FollowUser>, BackendError> {
        self.get_json("me/following", &[("email", email.to_string())], "following")
            .await
    }

    /// Fetch the stops planned for one day of a trip
    pub async fn get_trip_day_stops(
        &self,
        trip_id: &str,
        day: u32,
        email: &str,
    ) -> Result<Vec<Stop>, BackendError> {
        let path = format!(
            "me/trips/{}/days/{}/stops",
            urlencoding::encode(trip_id),
            day
        );

        self.get_json(&path, &[("email", email.to_string())], "trip stops")
            .await
    }
}
