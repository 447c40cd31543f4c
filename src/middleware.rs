//! Per-request correlation and access logging.
//!
//! `x-request-id` is taken from the incoming request (a load balancer may set it)
//! or minted as a UUID v4, and is echoed back on the response. Every request runs
//! inside a `request` span carrying that id, so all of its log lines correlate.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tracing::Instrument;

/// Header carrying the request id in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Assigns an id to requests that arrive without one.
pub fn set_request_id() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Copies the request id onto the response.
pub fn propagate_request_id() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Wraps the request in a `request` span and logs its outcome.
///
/// Runs inside `set_request_id`, so the id is always present by now.
pub async fn access_log(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
        .to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    async move {
        let start = Instant::now();
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(status = response.status().as_u16(), duration_ms, "Request completed");

        response
    }
    .instrument(span)
    .await
}
