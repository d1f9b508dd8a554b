use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{SearchQuery, SearchRecordsRequest, SearchResponse};
use crate::routes::{validation_failed, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_posts))
        .route("/search/rank", web::post().to(rank_records));
}

/// Match a query against caller-supplied records
///
/// POST /api/v1/search/rank
///
/// Request body:
/// ```json
/// {
///   "query": "地圖",
///   "records": [{"id": "p1", "ownerEmail": "a@x.com", "mapName": "台北地圖",
///                "mapType": "觀光", "createdAtMillis": 0}]
/// }
/// ```
async fn rank_records(
    state: web::Data<AppState>,
    req: web::Json<SearchRecordsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let results = state.search.search(&req.query, &req.records);
    tracing::debug!(
        "Query '{}' kept {} of {} records",
        req.query.trim(),
        results.len(),
        req.records.len()
    );

    HttpResponse::Ok().json(SearchResponse { results })
}

/// Search public posts through the backend, then re-rank locally
///
/// GET /api/v1/search?q={query}&limit={limit}
///
/// A blank query returns nothing without contacting the backend; a failing
/// backend search returns an empty result list.
async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let q = query.q.trim();
    if q.is_empty() {
        return HttpResponse::Ok().json(SearchResponse { results: Vec::new() });
    }

    let limit = query.limit.unwrap_or(state.search_limit);
    let records = match state.backend.search_posts(q, limit).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Backend search for '{}' failed: {}", q, e);
            Vec::new()
        }
    };

    let results = state.search.search(q, &records);
    tracing::info!("Search '{}' returning {} of {} records", q, results.len(), records.len());

    HttpResponse::Ok().json(SearchResponse { results })
}
