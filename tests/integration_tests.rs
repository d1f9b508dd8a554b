// Integration tests for Wonder Rank HTTP routes

use actix_web::{test, web, App};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wonder_rank::core::{RankingEngine, SearchMatcher};
use wonder_rank::routes::{configure_extractors, configure_routes, AppState};
use wonder_rank::services::{BackendClient, ContextCache};

const NOW: i64 = 1_700_000_000_000;

fn app_state(base_url: &str) -> AppState {
    AppState {
        backend: Arc::new(BackendClient::new(base_url, Duration::from_secs(2)).unwrap()),
        contexts: Arc::new(ContextCache::new(100, 60)),
        ranking: RankingEngine::with_default_weights(),
        search: SearchMatcher::default(),
        public_posts_limit: 300,
        search_limit: 300,
    }
}

/// Nothing listens on the discard port
const DEAD_BACKEND: &str = "http://127.0.0.1:9";

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_extractors)
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_rank_supplied_candidates() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let payload = json!({
        "candidates": [
            {"id": "2", "ownerEmail": "b@x.com", "mapName": "Trip", "mapType": "food", "createdAtMillis": NOW, "likes": 50},
            {"id": "1", "ownerEmail": "a@x.com", "mapName": "Trip", "mapType": "food", "createdAtMillis": NOW, "likes": 50}
        ],
        "context": {"followed": ["a@x.com"], "labels": ["Food"]},
        "nowMillis": NOW
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/rank")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total_candidates"], 2);
    assert_eq!(body["posts"][0]["id"], "1");
    assert_eq!(body["posts"][0]["score"], 670);
    assert_eq!(body["posts"][1]["score"], 370);
}

#[actix_web::test]
async fn test_rank_limit_validation() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::post()
        .uri("/api/v1/recommendations/rank")
        .set_json(json!({"candidates": [], "limit": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_malformed_json_is_json_error() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::post()
        .uri("/api/v1/search/rank")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "invalid_json");
}

#[actix_web::test]
async fn test_search_supplied_records() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let payload = json!({
        "query": "地圖",
        "records": [
            {"id": "a", "ownerEmail": "x", "mapName": "台北美食", "mapType": "餐廳", "createdAtMillis": 3},
            {"id": "b", "ownerEmail": "x", "mapName": "美食清單", "mapType": "地圖分類", "createdAtMillis": 2},
            {"id": "c", "ownerEmail": "x", "mapName": "台北地圖", "mapType": "觀光", "createdAtMillis": 1}
        ]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/search/rank")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c", "b"]);
}

#[actix_web::test]
async fn test_sort_supplied_stops() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let payload = json!({
        "stops": [
            {"id": "late", "name": "Bar", "startTime": "21:00"},
            {"id": "untimed", "name": "Park"},
            {"id": "early", "name": "Cafe", "startTime": "08:15", "endTime": "09:00"}
        ]
    });

    let req = test::TestRequest::post()
        .uri("/api/v1/stops/sort")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["stops"][0]["id"], "early");
    assert_eq!(body["stops"][1]["id"], "late");
    assert_eq!(body["stops"][2]["id"], "untimed");
}

#[actix_web::test]
async fn test_feed_degrades_to_empty_when_backend_down() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::get()
        .uri("/api/v1/recommendations?email=me%40x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"], json!([]));
    assert_eq!(body["total_candidates"], 0);
}

#[actix_web::test]
async fn test_search_blank_query_and_backend_down() {
    let app = init_app!(app_state(DEAD_BACKEND));

    for uri in ["/api/v1/search?q=", "/api/v1/search?q=%E5%9C%B0%E5%9C%96"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["results"], json!([]));
    }
}

#[actix_web::test]
async fn test_trip_stops_backend_down_is_bad_gateway() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::get()
        .uri("/api/v1/trips/t1/days/1/stops?email=me%40x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 502);
}

#[actix_web::test]
async fn test_personalised_feed_from_backend() {
    let mut server = mockito::Server::new_async().await;
    let now = chrono::Utc::now().timestamp_millis();

    let profile = server
        .mock("GET", "/me/profile")
        .match_query(mockito::Matcher::UrlEncoded("email".into(), "me@x.com".into()))
        .with_header("content-type", "application/json")
        .with_body(r#"{"email": "me@x.com", "userName": "Me", "userLabel": "咖啡、hiking"}"#)
        .expect(1)
        .create_async()
        .await;

    let following = server
        .mock("GET", "/me/following")
        .match_query(mockito::Matcher::UrlEncoded("email".into(), "me@x.com".into()))
        .with_header("content-type", "application/json")
        .with_body(r#"[{"email": "friend@x.com", "userName": "Friend"}, {"email": ""}]"#)
        .expect(1)
        .create_async()
        .await;

    let posts = json!([
        {"id": "plain", "ownerEmail": "z@x.com", "mapName": "Harbour", "mapType": "sea", "createdAtMillis": now, "likes": 80},
        {"id": "friend", "ownerEmail": "friend@x.com", "mapName": "Old town", "mapType": "walk", "createdAtMillis": now, "likes": 0},
        {"id": "coffee", "ownerEmail": "z@x.com", "mapName": "Beans", "mapType": "咖啡", "createdAtMillis": now, "likes": 0}
    ]);
    let public = server
        .mock("GET", "/posts/public")
        .match_query(mockito::Matcher::UrlEncoded("limit".into(), "300".into()))
        .with_header("content-type", "application/json")
        .with_body(posts.to_string())
        .expect(2)
        .create_async()
        .await;

    let app = init_app!(app_state(&server.url()));

    // The second request is served from the context cache
    for _ in 0..2 {
        let req = test::TestRequest::get()
            .uri("/api/v1/recommendations?email=me%40x.com&limit=2")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total_candidates"], 3);
        let posts = body["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0]["id"], "friend");
        assert_eq!(posts[1]["id"], "coffee");
    }

    profile.assert_async().await;
    following.assert_async().await;
    public.assert_async().await;
}

#[actix_web::test]
async fn test_trip_stops_sorted_from_backend() {
    let mut server = mockito::Server::new_async().await;

    let stops = server
        .mock("GET", "/me/trips/trip-1/days/2/stops")
        .match_query(mockito::Matcher::UrlEncoded("email".into(), "me@x.com".into()))
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"id": "s1", "name": "Dinner", "startTime": "18:30", "endTime": "20:00", "category": "用餐"},
                {"id": "s2", "name": "Sunrise", "startTime": "05:45", "endTime": ""},
                {"id": "s3", "name": "Shopping", "startTime": "", "endTime": ""}
            ]"#,
        )
        .create_async()
        .await;

    let app = init_app!(app_state(&server.url()));

    let req = test::TestRequest::get()
        .uri("/api/v1/trips/trip-1/days/2/stops?email=me%40x.com")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = body["stops"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["s2", "s1", "s3"]);

    assert_eq!(body["stops"][0]["timeRange"], "05:45\n--:--");
    assert_eq!(body["stops"][0]["isMeal"], false);
    assert_eq!(body["stops"][1]["isMeal"], true);
    assert_eq!(body["stops"][1]["displayName"], "Dinner");

    stops.assert_async().await;
}

#[actix_web::test]
async fn test_trip_stops_forbidden_passes_through() {
    let mut server = mockito::Server::new_async().await;

    let stops = server
        .mock("GET", "/me/trips/trip-1/days/1/stops")
        .match_query(mockito::Matcher::UrlEncoded("email".into(), "other@x.com".into()))
        .with_status(403)
        .with_body(r#"{"error": "forbidden"}"#)
        .create_async()
        .await;

    let app = init_app!(app_state(&server.url()));

    let req = test::TestRequest::get()
        .uri("/api/v1/trips/trip-1/days/1/stops?email=other%40x.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 403);

    stops.assert_async().await;
}

#[actix_web::test]
async fn test_forget_context_requires_email() {
    let app = init_app!(app_state(DEAD_BACKEND));

    let req = test::TestRequest::delete()
        .uri("/api/v1/recommendations/context")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::delete()
        .uri("/api/v1/recommendations/context?email=me%40x.com")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);
}
