//! HTTP server routes for version `v1`.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderName;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use hyper::Request;
use tower_http::compression::CompressionLayer;
use tower_http::propagate_header::PropagateHeaderLayer;
use tower_http::request_id::{MakeRequestUuid, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::{Level, Span};

use super::handlers::{announce, health_check};
use crate::core::Tracker;

/// Header used to correlate a request with its log lines.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// It adds the routes to the router.
///
/// `/tracker` is the same endpoint as `/announce`, kept for clients
/// configured with that path.
///
/// The router must be served with `into_make_service_with_connect_info` so
/// the handlers can see the client address.
#[allow(clippy::needless_pass_by_value)]
pub fn router(tracker: Arc<Tracker>, server_socket_addr: SocketAddr) -> Router {
    Router::new()
        // Health check
        .route("/health_check", get(health_check::handler))
        // Announce request
        .route("/announce", get(announce::handle))
        .route("/tracker", get(announce::handle))
        .with_state(tracker)
        .layer(CompressionLayer::new())
        .layer(PropagateHeaderLayer::new(HeaderName::from_static(REQUEST_ID_HEADER)))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(move |request: &Request<axum::body::Body>, _span: &Span| {
                    let method = request.method().to_string();
                    let uri = request.uri().path().to_string();
                    let request_id = request_id(request.headers());

                    tracing::info!(
                        target: "HTTP TRACKER",
                        %server_socket_addr, %method, %uri, %request_id, "request");
                })
                .on_response(move |response: &Response, latency: Duration, _span: &Span| {
                    let status_code = response.status();
                    let request_id = request_id(response.headers());
                    let latency_ms = latency.as_millis();

                    tracing::info!(
                        target: "HTTP TRACKER",
                        %server_socket_addr, latency = %latency_ms, status = %status_code, %request_id, "response");
                }),
        )
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
}

fn request_id(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}
