// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, UserContext, ScoredCandidate, SearchableRecord, SearchResult, Stop, ProfileRecord, FollowUser, RankingWeights, SearchWeights};
pub use requests::{ContextPayload, RankCandidatesRequest, RecommendationsQuery, SearchRecordsRequest, SearchQuery, SortStopsRequest, TripDayQuery};
pub use responses::{RecommendationsResponse, SearchResponse, StopView, StopsResponse, HealthResponse, ErrorResponse};
