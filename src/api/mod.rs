//! API Layer - the HTTP surface of the generation service.

pub mod generate;
pub mod middleware;

use std::time::Duration;
use axum::{Router, routing::{get, post}};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Create the main API router. The endpoint is stateless: every request
/// allocates its own prompt pair and provider client.
pub fn router(config: &Config) -> Router {
    let timeout = Duration::from_secs(config.server.request_timeout_secs);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate", post(generate::handler))
        .layer(axum::middleware::from_fn_with_state(
            timeout,
            middleware::timeout_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
