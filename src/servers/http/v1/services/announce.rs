//! The `announce` service.
//!
//! It builds the announcing [`Peer`](peer::Peer) from a parsed request and the
//! resolved peer IP, and delegates the `announce` logic to the
//! [`Tracker`](crate::core::Tracker::announce).
use std::sync::Arc;

use torrust_swarm_tracker_primitives::{peer, DurationSinceUnixEpoch};

use crate::core::{error, AnnounceOutcome, Tracker};
use crate::servers::http::v1::requests::announce::Announce;

/// The HTTP tracker `announce` service.
///
/// # Errors
///
/// Will return an error if the swarm store is unavailable.
pub async fn invoke(tracker: Arc<Tracker>, announce_request: &Announce, peer_ip: String) -> Result<AnnounceOutcome, error::Error> {
    let mut peer = peer_from_request(announce_request, peer_ip);

    tracker
        .announce(
            &announce_request.info_hash,
            &mut peer,
            &announce_request.event,
            announce_request.numwant,
        )
        .await
}

/// The `updated` time is left for the tracker to set.
#[must_use]
fn peer_from_request(announce_request: &Announce, peer_ip: String) -> peer::Peer {
    peer::Peer {
        peer_id: announce_request.peer_id.clone(),
        ip: peer_ip,
        port: announce_request.port,
        updated: DurationSinceUnixEpoch::ZERO,
        uploaded: announce_request.uploaded,
        downloaded: announce_request.downloaded,
        left: announce_request.left,
    }
}
