use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    ErrorResponse, RankCandidatesRequest, RecommendationsQuery, RecommendationsResponse, UserContext,
};
use crate::routes::{validation_failed, AppState};
use crate::services::normalize_email;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::get().to(recommend_for_user))
        .route("/recommendations/rank", web::post().to(rank_candidates))
        .route("/recommendations/context", web::delete().to(forget_context));
}

/// Rank a caller-supplied candidate list
///
/// POST /api/v1/recommendations/rank
///
/// Request body:
/// ```json
/// {
///   "candidates": [{"id": "p1", "ownerEmail": "a@x.com", "mapName": "Trip",
///                   "mapType": "food", "createdAtMillis": 0, "likes": 3}],
///   "context": {"followed": ["a@x.com"], "labels": ["food"]},
///   "nowMillis": 1700000000000,
///   "limit": 20
/// }
/// ```
async fn rank_candidates(
    state: web::Data<AppState>,
    req: web::Json<RankCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let now = req
        .now_millis
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
    let context = UserContext::from(req.context);
    let total_candidates = req.candidates.len();

    let mut posts = state.ranking.rank(req.candidates, &context, now);
    if let Some(limit) = req.limit {
        posts.truncate(limit as usize);
    }

    tracing::debug!("Ranked {} of {} supplied candidates", posts.len(), total_candidates);

    HttpResponse::Ok().json(RecommendationsResponse {
        posts,
        total_candidates,
    })
}

/// Personalised feed of public posts
///
/// GET /api/v1/recommendations?email={email}&limit={limit}
///
/// A missing or failing profile lookup degrades to an unpersonalised feed;
/// a failing post fetch degrades to an empty one.
async fn recommend_for_user(
    state: web::Data<AppState>,
    query: web::Query<RecommendationsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let email = query
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|e| !e.is_empty());

    let context = match email.as_deref() {
        Some(email) => match state.contexts.resolve(email, &state.backend).await {
            Ok(ctx) => ctx,
            Err(e) => {
                tracing::warn!("Failed to load context for {}, ranking without it: {}", email, e);
                UserContext::default()
            }
        },
        None => UserContext::default(),
    };

    let candidates = match state.backend.get_public_posts(state.public_posts_limit).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::error!("Failed to fetch public posts: {}", e);
            Vec::new()
        }
    };

    let total_candidates = candidates.len();
    let now = chrono::Utc::now().timestamp_millis();
    let mut posts = state.ranking.rank(candidates, &context, now);
    if let Some(limit) = query.limit {
        posts.truncate(limit as usize);
    }

    tracing::info!(
        "Returning {} recommendations for {} (from {} candidates)",
        posts.len(),
        email.as_deref().unwrap_or("anonymous"),
        total_candidates
    );

    HttpResponse::Ok().json(RecommendationsResponse {
        posts,
        total_candidates,
    })
}

/// Drop a user's cached context so the next feed re-reads profile and follows
///
/// DELETE /api/v1/recommendations/context?email={email}
async fn forget_context(
    state: web::Data<AppState>,
    query: web::Query<RecommendationsQuery>,
) -> impl Responder {
    let Some(email) = query.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Missing email parameter".to_string(),
            message: "email query parameter is required".to_string(),
            status_code: 400,
        });
    };

    state.contexts.invalidate(email).await;
    tracing::debug!("Invalidated context for {}", email);

    HttpResponse::NoContent().finish()
}
