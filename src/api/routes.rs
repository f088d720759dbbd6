use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tower::ServiceBuilder;
use axum::extract::DefaultBodyLimit;

use crate::config::Config;

use super::handlers::*;

pub fn create_router(config: Config) -> Router {
    let body_limit = config.server.body_limit_bytes();

    Router::new()
        .route("/api/health", get(health))
        .route("/api/convert", post(convert_upload))
        .route("/api/preview", post(preview_upload))
        .with_state(AppState::new(config))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(CorsLayer::permissive())
        )
}
