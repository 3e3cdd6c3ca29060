use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod pets;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: pet CRUD, uploaded images, health,
/// metrics and API docs.
pub fn build_router(state: ServerState, cors: CorsLayer, max_body_bytes: usize) -> Router {
    let images = ServeDir::new(&state.blob_root);
    let public_prefix = state.public_prefix.clone();

    let api = Router::new()
        .route("/pets", get(pets::get_all).post(pets::create))
        .route("/pets/search/:term", get(pets::search))
        .route(
            "/pets/:id",
            get(pets::get_by_id)
                .put(pets::update)
                .patch(pets::update)
                .delete(pets::delete),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(&public_prefix, images)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
