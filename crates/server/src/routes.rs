use axum::{
    routing::{get, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::observability;
use crate::state::AppState;

pub mod gifts;
pub mod search;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

/// Build the full application router: health, metrics, gift list, search, static assets.
pub fn build_router(state: AppState, cors: CorsLayer, frontend_dir: &str) -> Router {
    let static_dir = ServeDir::new(frontend_dir)
        .fallback(ServeFile::new(format!("{frontend_dir}/index.html")));

    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    // `/gifts/` exists so that a missing id is a 400 rather than a 404
    let gift_routes = Router::new()
        .route("/gifts", get(gifts::list_gifts).post(gifts::add_gift))
        .route("/gifts/", put(gifts::update_gift_without_id).delete(gifts::delete_gift_without_id))
        .route("/gifts/:id", put(gifts::update_gift).delete(gifts::delete_gift));

    let search_routes = Router::new().route("/search/:query", get(search::search_gifts));

    public
        .merge(gift_routes)
        .merge(search_routes)
        .with_state(state)
        .fallback_service(static_dir)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
