//! HTTP request metrics.
//!
//! Recorded for every response, including ones produced before a handler
//! runs: 401/403 from the access gates, 404/405 from routing, and 400/415
//! from body extraction.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::observability::metrics::record_http_request;

/// Record method, normalized path, status and duration for the request.
///
/// Must be the outermost layer so rejections from inner layers are counted.
pub async fn http_metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_http_request(&method, &path, response.status().as_u16(), start.elapsed());

    response
}
