//! Axum [`handlers`](axum#handlers) for the `announce` requests.
//!
//! Refer to [HTTP server](crate::servers::http) for more information about the
//! `announce` request.
//!
//! The handler resolves the peer IP and picks the response format.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use crate::core::{AnnounceOutcome, Tracker};
use crate::servers::http::v1::extractors::announce_request::ExtractRequest;
use crate::servers::http::v1::extractors::client_ip_sources::Extract as ExtractClientIpSources;
use crate::servers::http::v1::requests::announce::Announce;
use crate::servers::http::v1::responses;
use crate::servers::http::v1::services::peer_ip_resolver::{self, ClientIpSources};
use crate::servers::http::v1::services;

/// It handles the `announce` request.
pub async fn handle(
    State(tracker): State<Arc<Tracker>>,
    ExtractRequest(announce_request): ExtractRequest,
    ExtractClientIpSources(client_ip_sources): ExtractClientIpSources,
) -> Response {
    debug!("http announce request: {:#?}", announce_request);

    match handle_announce(&tracker, &announce_request, &client_ip_sources).await {
        Ok(outcome) => build_response(&announce_request, outcome),
        Err(error) => error.into_response(),
    }
}

async fn handle_announce(
    tracker: &Arc<Tracker>,
    announce_request: &Announce,
    client_ip_sources: &ClientIpSources,
) -> Result<AnnounceOutcome, responses::error::Error> {
    let peer_ip = peer_ip_resolver::resolve(
        tracker.is_behind_reverse_proxy(),
        announce_request.ip.as_deref(),
        client_ip_sources,
    )?;

    Ok(services::announce::invoke(tracker.clone(), announce_request, peer_ip).await?)
}

/// A peer that leaves gets an empty `200 OK`.
fn build_response(announce_request: &Announce, outcome: AnnounceOutcome) -> Response {
    match outcome {
        AnnounceOutcome::Stopped => (StatusCode::OK, "").into_response(),
        AnnounceOutcome::Announced(announce_data) => {
            responses::Announce::from_data(announce_data, announce_request.compact, announce_request.no_peer_id).into_response()
        }
    }
}
