//! The core `tracker` module contains the announce logic, which is independent of the delivery layer.
//!
//! ```text
//! Delivery layer     Domain layer
//!
//!     HTTP tracker |> Core tracker |> Swarm directory |> Key-value store
//! ```
//!
//! # Tracker
//!
//! The [`Tracker`] keeps one swarm per torrent in the [`SwarmDirectory`]. A
//! peer announces itself with:
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use torrust_swarm_tracker_primitives::announce_event::AnnounceEvent;
//! use torrust_swarm_tracker_primitives::info_hash::InfoHash;
//! use torrust_swarm_tracker_primitives::peer;
//!
//! let info_hash: InfoHash = "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse().unwrap();
//!
//! let peer = peer::Peer {
//!     peer_id: peer::Id::from(*b"-qB00000000000000001"),
//!     ip: "126.0.0.1".to_string(),
//!     port: 8081,
//!     updated: Duration::from_secs(1_669_397_478),
//!     uploaded: 0,
//!     downloaded: 0,
//!     left: 0,
//! };
//! ```
//!
//! ```text
//! let outcome = tracker.announce(&info_hash, &mut peer, &AnnounceEvent::Started, Some(50)).await?;
//! ```
//!
//! What the tracker does depends on the event:
//!
//! Event | Swarm directory | Outcome
//! ---|---|---
//! `started`, or no event | The peer is added, or its record refreshed | [`AnnounceOutcome::Announced`]
//! `stopped` | The peer is removed | [`AnnounceOutcome::Stopped`], no peer list
//! `completed` | Nothing | [`AnnounceOutcome::Announced`]
//! anything else | Nothing | [`AnnounceOutcome::Announced`]
//!
//! The returned peer list includes the requesting peer when it is in the
//! swarm. The swarm counters describe the requesting peer only:
//!
//! ```rust,no_run
//! use torrust_swarm_tracker_configuration::AnnouncePolicy;
//! use torrust_swarm_tracker_primitives::peer;
//! use torrust_swarm_tracker_primitives::swarm_metadata::SwarmMetadata;
//!
//! pub struct AnnounceData {
//!     pub peers: Vec<peer::Peer>,
//!     pub stats: SwarmMetadata,   // 1 seeder or 1 leecher, depending on the peer `left`
//!     pub policy: AnnouncePolicy, // the tracker announce policy.
//! }
//! ```
//!
//! # Configuration
//!
//! Option | Section | Use
//! ---|---|---
//! `interval`, `interval_min`, `tracker_id` | `core.announce_policy` | Copied into every announce response
//! `peer_ttl` | `core.swarm_policy` | Seconds a peer stays listed after its last announce
//! `default_numwant`, `max_numwant` | `core.swarm_policy` | Size of the returned peer list
//! `on_reverse_proxy` | `core` | Take the peer IP from `X-Forwarded-For`
//!
//! # Persistence
//!
//! Swarms live only in the [`store`]. Nothing is loaded at start up.
pub mod error;
pub mod store;
pub mod swarm;

use std::sync::Arc;
use std::time::Duration;

use derive_more::Constructor;
use torrust_swarm_tracker_clock::clock::Time;
use torrust_swarm_tracker_configuration::{AnnouncePolicy, Core, Store, SwarmPolicy};
use torrust_swarm_tracker_primitives::announce_event::AnnounceEvent;
use torrust_swarm_tracker_primitives::info_hash::InfoHash;
use torrust_swarm_tracker_primitives::peer;
use torrust_swarm_tracker_primitives::swarm_metadata::SwarmMetadata;
use tracing::debug;

use self::error::Error;
use self::store::KeyValueStore;
use self::swarm::SwarmDirectory;
use crate::CurrentClock;

/// The domain layer tracker service.
///
/// Its main responsibility is to handle the `announce` requests. It is shared
/// by all the HTTP request handlers.
pub struct Tracker {
    announce_policy: AnnouncePolicy,
    swarm_policy: SwarmPolicy,
    on_reverse_proxy: bool,
    swarms: SwarmDirectory,
}

/// Structure that holds the data returned by the `announce` request.
#[derive(Clone, Debug, PartialEq, Constructor, Default)]
pub struct AnnounceData {
    /// Peers in the swarm, at most `numwant` of them.
    pub peers: Vec<peer::Peer>,
    /// Swarm statistics
    pub stats: SwarmMetadata,
    pub policy: AnnouncePolicy,
}

/// The result of an `announce` request.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnounceOutcome {
    /// The peer left the swarm. Nothing else is returned to it.
    Stopped,
    /// Any other event.
    Announced(AnnounceData),
}

impl Tracker {
    /// `Tracker` constructor.
    ///
    /// # Errors
    ///
    /// Will return a `store::error::Error` if unable to build the store client.
    pub fn new(config: &Core, store_config: &Store) -> Result<Tracker, store::error::Error> {
        let store: Arc<dyn KeyValueStore> = Arc::from(store::driver::build(store_config)?);

        Ok(Self::with_store(config, store, &store_config.key_prefix))
    }

    /// `Tracker` constructor for an already built store.
    #[must_use]
    pub fn with_store(config: &Core, store: Arc<dyn KeyValueStore>, key_prefix: &str) -> Tracker {
        let peer_ttl = Duration::from_secs(u64::from(config.swarm_policy.peer_ttl));

        Tracker {
            announce_policy: config.announce_policy.clone(),
            swarm_policy: config.swarm_policy,
            on_reverse_proxy: config.on_reverse_proxy,
            swarms: SwarmDirectory::new(store, key_prefix, peer_ttl),
        }
    }

    /// Returns `true` is the tracker is running behind a reverse proxy.
    #[must_use]
    pub fn is_behind_reverse_proxy(&self) -> bool {
        self.on_reverse_proxy
    }

    #[must_use]
    pub fn get_announce_policy(&self) -> AnnouncePolicy {
        self.announce_policy.clone()
    }

    #[must_use]
    pub fn get_swarm_policy(&self) -> SwarmPolicy {
        self.swarm_policy
    }

    #[must_use]
    pub fn swarms(&self) -> &SwarmDirectory {
        &self.swarms
    }

    /// Number of peers to return for the `numwant` a client sent.
    ///
    /// Clients that do not send it get the default. Nobody gets more than the
    /// maximum.
    #[must_use]
    pub fn peers_wanted(&self, numwant: Option<u32>) -> usize {
        let wanted = numwant
            .unwrap_or(self.swarm_policy.default_numwant)
            .min(self.swarm_policy.max_numwant);

        usize::try_from(wanted).unwrap_or(usize::MAX)
    }

    /// It handles an announce request.
    ///
    /// The `peer.updated` timestamp is set to now. The peer IP must already be
    /// resolved by the delivery layer.
    ///
    /// # Errors
    ///
    /// Will return `Error::StoreUnavailable` if the swarm can not be read or
    /// written.
    pub async fn announce(
        &self,
        info_hash: &InfoHash,
        peer: &mut peer::Peer,
        event: &AnnounceEvent,
        numwant: Option<u32>,
    ) -> Result<AnnounceOutcome, Error> {
        peer.updated = CurrentClock::now();

        debug!(target: "TRACKER", %info_hash, %event, ?peer, "announce");

        match event {
            AnnounceEvent::Started | AnnounceEvent::None => {
                self.swarms.upsert_peer(info_hash, peer).await?;
            }
            AnnounceEvent::Stopped => {
                self.swarms.remove_peer(info_hash, &peer.peer_id).await?;

                return Ok(AnnounceOutcome::Stopped);
            }
            AnnounceEvent::Completed | AnnounceEvent::Other(_) => {}
        }

        let peers = self.swarms.list_peers(info_hash, self.peers_wanted(numwant)).await?;

        Ok(AnnounceOutcome::Announced(AnnounceData {
            peers,
            stats: SwarmMetadata::for_left(peer.left),
            policy: self.get_announce_policy(),
        }))
    }

    /// Checks the swarm store answers.
    ///
    /// # Errors
    ///
    /// Will return `Error::StoreUnavailable` if it does not.
    pub async fn check_store(&self) -> Result<(), Error> {
        self.swarms.store().ping().await?;

        Ok(())
    }
}
