use std::path::Path;

use axum::{
    routing::{delete, get, patch},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::{openapi::ApiDoc, state::ServerState};

pub mod cafes;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: landing page, cafe API and docs.
pub fn build_router(state: ServerState, static_dir: &str, cors: CorsLayer) -> Router {
    let index = ServeFile::new(Path::new(static_dir).join("index.html"));

    let api = Router::new()
        .route("/random", get(cafes::random))
        .route("/all", get(cafes::all))
        .route("/search/", get(cafes::search))
        .route("/add/", get(cafes::add).post(cafes::add))
        .route("/update-price/:cafe_id", patch(cafes::update_price))
        .route("/report-closed/:cafe_id", delete(cafes::report_closed));

    Router::new()
        .route_service("/", index)
        .nest_service("/static", ServeDir::new(static_dir))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
