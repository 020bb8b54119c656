use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::proverb::ProverbService;

use crate::{metrics, openapi::ApiDoc};

pub mod proverbs;

/// Shared handler state: the proverb store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub proverbs: Arc<ProverbService>,
}

impl AppState {
    pub fn new(proverbs: ProverbService) -> Self {
        Self { proverbs: Arc::new(proverbs) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn metrics_text() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/api-docs/openapi.json", get(openapi_json));

    let proverb_routes = Router::new()
        .route("/", get(proverbs::list_proverbs))
        .route("/proverbs", get(proverbs::list_proverbs).post(proverbs::create_proverb))
        .route("/proverbs/random", get(proverbs::random_proverb))
        .route(
            "/proverbs/:id",
            get(proverbs::get_proverb)
                .put(proverbs::update_proverb)
                .post(proverbs::update_proverb)
                .delete(proverbs::delete_proverb),
        )
        .route("/proverbs/:id/delete", post(proverbs::delete_proverb));

    ops.merge(proverb_routes)
        .with_state(state)
        .layer(middleware::from_fn(metrics::count_requests))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
