// Route exports
pub mod errors;
pub mod health;
pub mod recommendations;
pub mod search;
pub mod stops;

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use validator::ValidationErrors;

use crate::core::{RankingEngine, SearchMatcher};
use crate::models::ErrorResponse;
use crate::services::{BackendClient, ContextCache};

pub use errors::{handle_json_payload_error, handle_query_payload_error, JsonError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<BackendClient>,
    pub contexts: Arc<ContextCache>,
    pub ranking: RankingEngine,
    pub search: SearchMatcher,
    /// How many public posts to pull per recommendation pass
    pub public_posts_limit: u16,
    /// Default upstream limit for search
    pub search_limit: u16,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(recommendations::configure)
            .configure(search::configure)
            .configure(stops::configure),
    );
}

/// JSON and query extractor settings with JSON error bodies
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error));
}

fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}
