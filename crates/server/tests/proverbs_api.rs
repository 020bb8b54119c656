//! Router-level tests: requests go straight into the axum router through
//! `tower::ServiceExt::oneshot`, no socket involved. Each test gets its own
//! collection file in a temp directory.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes::{self, AppState};
use service::proverb::ProverbService;
use service::storage::{JsonFileStore, MemoryStore, ProverbRepository};

struct TestApp {
    router: Router,
    _dir: tempfile::TempDir,
    data_file: std::path::PathBuf,
}

fn test_app() -> TestApp {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_file = dir.path().join("proverbs.json");
    let repo: Arc<dyn ProverbRepository> = Arc::new(JsonFileStore::new(&data_file));
    let svc = ProverbService::new(repo);
    let router = routes::build_router(AppState::new(svc), CorsLayer::very_permissive());
    TestApp { router, _dir: dir, data_file }
}

fn proverb_body(english: &str, category: &str) -> Value {
    json!({
        "textDari": "کار نیکو کردن از پر کردن است",
        "textPashto": "کار په تکرار سره ښه کېږي",
        "translationEn": english,
        "meaning": "Practice makes perfect",
        "category": category,
    })
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(req).await.expect("router response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, location, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).expect("request");
    let (status, _, body) = send(app, req).await;
    (status, body)
}

async fn send_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Option<String>, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).expect("encode")))
        .expect("request");
    send(app, req).await
}

async fn send_empty(app: &Router, method: &str, uri: &str) -> StatusCode {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).expect("request");
    send(app, req).await.0
}

async fn create(app: &Router, english: &str, category: &str) -> Value {
    let (status, _, body) = send_json(app, "POST", "/proverbs", &proverb_body(english, category)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {body}");
    body
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let (status, body) = get(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn create_returns_location_and_record() {
    let app = test_app();
    let (status, location, body) =
        send_json(&app.router, "POST", "/proverbs", &proverb_body("Practice", "effort")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/proverbs/1"));
    assert_eq!(body["id"], 1);
    assert_eq!(body["translationEn"], "Practice");

    let (status, fetched) = get(&app.router, "/proverbs/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, body);

    let on_disk: Value = serde_json::from_slice(&std::fs::read(&app.data_file).expect("data file")).expect("json");
    assert_eq!(on_disk.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn create_accepts_form_posts() {
    let app = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/proverbs")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "textDari=a&textPashto=b&translationEn=Patience+is+bitter&meaning=m&category=patience",
        ))
        .expect("request");
    let (status, _, body) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["translationEn"], "Patience is bitter");
}

#[tokio::test]
async fn create_with_blank_field_is_rejected() {
    let app = test_app();
    let mut body = proverb_body("x", "y");
    body["meaning"] = json!("");
    let (status, _, err) = send_json(&app.router, "POST", "/proverbs", &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Validation Error");

    // a missing key fails the same way
    let (status, _, _) = send_json(&app.router, "POST", "/proverbs", &json!({"textDari": "a"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = get(&app.router, "/proverbs").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = test_app();
    let req = Request::builder()
        .method("POST")
        .uri("/proverbs")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, _, _) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_or_invalid_id() {
    let app = test_app();
    let (status, body) = get(&app.router, "/proverbs/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Proverb not found");

    let (status, body) = get(&app.router, "/proverbs/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let (status, _, body) = send_json(&app.router, "PUT", "/proverbs/abc", &proverb_body("x", "y")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");

    let req = Request::builder().method("DELETE").uri("/proverbs/abc").body(Body::empty()).expect("request");
    let (status, _, body) = send(&app.router, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn list_filters_by_category_and_search() {
    let app = test_app();
    create(&app.router, "Still water runs deep", "Water").await;
    create(&app.router, "Every drop makes a river", "water").await;
    create(&app.router, "Fortune favours the bold", "luck").await;

    let (status, all) = get(&app.router, "/proverbs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().map(Vec::len), Some(3));

    let (_, root) = get(&app.router, "/").await;
    assert_eq!(root, all);

    let (_, water) = get(&app.router, "/proverbs?category=WATER").await;
    let ids: Vec<u64> = water.as_array().expect("array").iter().filter_map(|p| p["id"].as_u64()).collect();
    assert_eq!(ids, vec![1, 2]);

    let (_, searched) = get(&app.router, "/proverbs?category=water&search=RIVER").await;
    let ids: Vec<u64> = searched.as_array().expect("array").iter().filter_map(|p| p["id"].as_u64()).collect();
    assert_eq!(ids, vec![2]);

    let (_, empty_params) = get(&app.router, "/proverbs?category=&search=").await;
    assert_eq!(empty_params, all);
}

#[tokio::test]
async fn random_needs_a_non_empty_collection() {
    let app = test_app();
    let (status, _) = get(&app.router, "/proverbs/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let created = create(&app.router, "Only one", "solo").await;
    let (status, body) = get(&app.router, "/proverbs/random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);
}

#[tokio::test]
async fn update_via_put_and_post() {
    let app = test_app();
    create(&app.router, "before", "a").await;

    let (status, _, body) = send_json(&app.router, "PUT", "/proverbs/1", &proverb_body("after put", "b")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["translationEn"], "after put");

    let (status, _, body) = send_json(&app.router, "POST", "/proverbs/1", &proverb_body("after post", "c")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "c");

    let (_, fetched) = get(&app.router, "/proverbs/1").await;
    assert_eq!(fetched["translationEn"], "after post");
}

#[tokio::test]
async fn update_errors() {
    let app = test_app();
    create(&app.router, "keep", "a").await;

    let (status, _, _) = send_json(&app.router, "PUT", "/proverbs/99", &proverb_body("x", "y")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut blank = proverb_body("x", "y");
    blank["category"] = json!("");
    let (status, _, _) = send_json(&app.router, "PUT", "/proverbs/1", &blank).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, fetched) = get(&app.router, "/proverbs/1").await;
    assert_eq!(fetched["translationEn"], "keep");

    let mut spaced = proverb_body("spaced", "y");
    spaced["category"] = json!("  ");
    let (status, _, body) = send_json(&app.router, "PUT", "/proverbs/1", &spaced).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "  ");
}

#[tokio::test]
async fn create_accepts_whitespace_only_field() {
    let app = test_app();
    let mut body = proverb_body("spaced", "y");
    body["textDari"] = json!(" ");
    let (status, _, created) = send_json(&app.router, "POST", "/proverbs", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["textDari"], " ");
}

#[tokio::test]
async fn delete_always_succeeds() {
    let app = test_app();
    create(&app.router, "one", "a").await;
    create(&app.router, "two", "a").await;

    assert_eq!(send_empty(&app.router, "DELETE", "/proverbs/1").await, StatusCode::NO_CONTENT);
    assert_eq!(get(&app.router, "/proverbs/1").await.0, StatusCode::NOT_FOUND);
    assert_eq!(send_empty(&app.router, "DELETE", "/proverbs/1").await, StatusCode::NO_CONTENT);

    assert_eq!(send_empty(&app.router, "POST", "/proverbs/2/delete").await, StatusCode::NO_CONTENT);
    let (_, list) = get(&app.router, "/proverbs").await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn corrupt_collection_is_a_server_error() {
    let app = test_app();
    std::fs::write(&app.data_file, "[{\"id\": \"oops\"}]").expect("write corrupt file");
    let (status, body) = get(&app.router, "/proverbs").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn metrics_and_openapi_are_served() {
    let repo: Arc<dyn ProverbRepository> = Arc::new(MemoryStore::default());
    let svc = ProverbService::new(repo);
    let router = routes::build_router(AppState::new(svc), CorsLayer::very_permissive());
    create(&router, "counted", "a").await;

    let req = Request::builder().uri("/metrics").body(Body::empty()).expect("request");
    let response = router.clone().oneshot(req).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("proverbs_requests_total"));
    assert!(text.contains("proverbs_created_total"));

    let (status, doc) = get(&router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/proverbs/{id}"].is_object());
}
