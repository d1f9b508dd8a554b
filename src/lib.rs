//! Wonder Rank - recommendation, search and itinerary ordering for the Wonder Map app
//!
//! The pure ranking rules live in [`core`]; [`routes`] exposes them over HTTP,
//! either on caller-supplied records or on records pulled from the
//! map-collection backend through [`services`].

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{RankingEngine, SearchConfig, SearchMatcher, time_key, sort_stops, TIME_KEY_MAX};
pub use models::{Candidate, UserContext, ScoredCandidate, SearchableRecord, SearchResult, Stop, RankingWeights, SearchWeights};
