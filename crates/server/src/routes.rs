pub mod dogs;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::openapi;
use crate::state::ServerState;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the application router: dog routes on `base_path`, health and the
/// OpenAPI document on fixed paths.
///
/// `base_path` must not be one of [`configs::RESERVED_PATHS`]; callers validate
/// it through [`configs::HttpConfig::validate`].
pub fn build_router(state: ServerState, base_path: &str, cors: CorsLayer) -> Router {
    let doc = openapi::document(base_path);

    let dog_routes = Router::new()
        .route(base_path, get(dogs::list).post(dogs::create))
        .with_state(state);

    let public = Router::new()
        .route(configs::HEALTH_PATH, get(health))
        .route(
            configs::OPENAPI_PATH,
            get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        );

    public
        .merge(dog_routes)
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
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
