// Core algorithm exports
pub mod labels;
pub mod ranking;
pub mod search;
pub mod timing;

pub use labels::parse_interest_labels;
pub use ranking::{RankingEngine, score_candidate};
pub use search::{SearchConfig, SearchMatcher};
pub use timing::{compare_stops, sort_stops, time_key, TIME_KEY_MAX, TIME_PLACEHOLDER};
