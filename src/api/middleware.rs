//! API Middleware - request timeout and request id tracking.

use std::time::Duration;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

/// Hard ceiling on total request processing time. Streaming responses hand
/// their body back before this fires; the deadline bounds everything up to
/// the first byte.
pub async fn timeout_middleware(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => Err(StatusCode::REQUEST_TIMEOUT),
    }
}

/// Request ID middleware
pub async fn request_id_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let request_id = uuid::Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "X-Request-ID",
        request_id.parse().unwrap(),
    );

    let mut response = next.run(request).await;

    response.headers_mut().insert(
        "X-Request-ID",
        request_id.parse().unwrap(),
    );

    Ok(response)
}
