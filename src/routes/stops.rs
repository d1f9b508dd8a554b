use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::sort_stops;
use crate::models::{ErrorResponse, SortStopsRequest, StopsResponse, TripDayQuery};
use crate::routes::{validation_failed, AppState};
use crate::services::BackendError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/stops/sort", web::post().to(sort_supplied_stops))
        .route("/trips/{trip_id}/days/{day}/stops", web::get().to(trip_day_stops));
}

/// Order caller-supplied stops by start time, end time, then name
///
/// POST /api/v1/stops/sort
async fn sort_supplied_stops(req: web::Json<SortStopsRequest>) -> impl Responder {
    let mut stops = req.into_inner().stops;
    sort_stops(&mut stops);

    HttpResponse::Ok().json(StopsResponse::from(stops))
}

/// Fetch one itinerary day from the backend in time order
///
/// GET /api/v1/trips/{tripId}/days/{day}/stops?email={email}
async fn trip_day_stops(
    state: web::Data<AppState>,
    path: web::Path<(String, u32)>,
    query: web::Query<TripDayQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let (trip_id, day) = path.into_inner();

    match state
        .backend
        .get_trip_day_stops(&trip_id, day, &query.email)
        .await
    {
        Ok(mut stops) => {
            sort_stops(&mut stops);
            tracing::debug!("Trip {} day {}: {} stops", trip_id, day, stops.len());
            HttpResponse::Ok().json(StopsResponse::from(stops))
        }
        Err(BackendError::NotFound(what)) => HttpResponse::NotFound().json(ErrorResponse {
            error: "Trip day not found".to_string(),
            message: what,
            status_code: 404,
        }),
        Err(BackendError::Forbidden(what)) => HttpResponse::Forbidden().json(ErrorResponse {
            error: "Trip access denied".to_string(),
            message: what,
            status_code: 403,
        }),
        Err(e) => {
            tracing::error!("Failed to load stops for trip {} day {}: {}", trip_id, day, e);
            HttpResponse::BadGateway().json(ErrorResponse {
                error: "Failed to load trip stops".to_string(),
                message: e.to_string(),
                status_code: 502,
            })
        }
    }
}
