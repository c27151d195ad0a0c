use axum::{
    extract::DefaultBodyLimit,
    http::header::HeaderName,
    routing::get,
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{Health, Message};

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod properties;
pub mod users;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn welcome() -> Json<Message> {
    Json(Message::new("Welcome to the property listing API"))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Permissive CORS that still lets browsers read the listing total.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive().expose_headers([HeaderName::from_static(TOTAL_COUNT_HEADER)])
}

fn api_v1() -> Router<AppState> {
    Router::new()
        .route("/properties", get(properties::list).post(properties::create))
        .route(
            "/properties/:id",
            get(properties::detail)
                .patch(properties::update)
                .put(properties::update)
                .delete(properties::delete),
        )
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", get(users::detail))
}

/// Build the full application router.
pub fn build_router(state: AppState, body_limit: usize) -> Router {
    let trace = TraceLayer::new_for_http()
        // 每次请求一个 span，包含方法与路径
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        // 响应返回时记录状态码与耗时
        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api/v1", api_v1())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(build_cors())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}
