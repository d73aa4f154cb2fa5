//! The swarm directory: which peers are sharing each torrent.
//!
//! Each swarm is one hash in the [`KeyValueStore`]:
//!
//! ```text
//! torrent:<info hash hex>
//!     <peer id bytes> => "<ip>:<port>:<last seen>"
//!     <peer id bytes> => "<ip>:<port>:<last seen>"
//! ```
//!
//! Every upsert refreshes the expiry of the whole hash, so a swarm nobody
//! announces to disappears from the store by itself. Single peers that stop
//! announcing are evicted lazily: the first listing that sees a record older
//! than the peer TTL deletes it.
pub mod record;

use std::sync::Arc;
use std::time::Duration;

use torrust_swarm_tracker_clock::clock::Time;
use torrust_swarm_tracker_primitives::info_hash::InfoHash;
use torrust_swarm_tracker_primitives::peer::{self, Peer};
use tracing::{debug, warn};

use self::record::Record;
use super::error::Error;
use super::store::KeyValueStore;
use crate::CurrentClock;

pub struct SwarmDirectory {
    store: Arc<dyn KeyValueStore>,
    key_prefix: String,
    peer_ttl: Duration,
}

impl SwarmDirectory {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, key_prefix: &str, peer_ttl: Duration) -> Self {
        Self {
            store,
            key_prefix: key_prefix.to_owned(),
            peer_ttl,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub fn peer_ttl(&self) -> Duration {
        self.peer_ttl
    }

    /// The store key of the swarm for `info_hash`.
    #[must_use]
    pub fn key(&self, info_hash: &InfoHash) -> String {
        format!("{}{info_hash}", self.key_prefix)
    }

    /// Adds the peer to the swarm, or replaces its previous record.
    ///
    /// It is a single store operation that also refreshes the expiry of the
    /// swarm. Nothing is read first.
    ///
    /// # Errors
    ///
    /// Will return `Error::StoreUnavailable` if the store fails.
    pub async fn upsert_peer(&self, info_hash: &InfoHash, peer: &Peer) -> Result<(), Error> {
        let record = Record::from(peer);

        debug!(target: "SWARM", %info_hash, peer_id = %peer.peer_id, %record, "upsert peer");

        self.store
            .set_field(&self.key(info_hash), peer.peer_id.as_bytes(), &record.to_string(), self.peer_ttl)
            .await?;

        Ok(())
    }

    /// Removes the peer from the swarm. Removing a peer that is not there is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Will return `Error::StoreUnavailable` if the store fails.
    pub async fn remove_peer(&self, info_hash: &InfoHash, peer_id: &peer::Id) -> Result<(), Error> {
        debug!(target: "SWARM", %info_hash, %peer_id, "remove peer");

        self.store
            .delete_fields(&self.key(info_hash), &[peer_id.as_bytes().to_vec()])
            .await?;

        Ok(())
    }

    /// Returns at most `limit` peers that announced within the peer TTL.
    ///
    /// Stale records found on the way are deleted with one store call before
    /// returning. Records that can not be parsed are skipped. The order of
    /// the peers is unspecified.
    ///
    /// The store only keeps the address of each peer, so the byte counters
    /// of the returned peers are zero.
    ///
    /// # Errors
    ///
    /// Will return `Error::StoreUnavailable` if the store fails.
    pub async fn list_peers(&self, info_hash: &InfoHash, limit: usize) -> Result<Vec<Peer>, Error> {
        let key = self.key(info_hash);

        let fields = self.store.get_all(&key).await?;

        let mut peers = Vec::with_capacity(fields.len().min(limit));
        let mut stale = Vec::new();

        for (field, value) in fields {
            let record = match value.parse::<Record>() {
                Ok(record) => record,
                Err(err) => {
                    warn!(target: "SWARM", %info_hash, %err, "skipping malformed swarm record");
                    continue;
                }
            };

            if CurrentClock::elapsed_since(&record.last_seen) > self.peer_ttl {
                stale.push(field);
                continue;
            }

            let peer_id = match peer::Id::try_from(field) {
                Ok(peer_id) => peer_id,
                Err(err) => {
                    warn!(target: "SWARM", %info_hash, %err, "skipping swarm record with an invalid peer id");
                    continue;
                }
            };

            peers.push(Peer {
                peer_id,
                ip: record.ip,
                port: record.port,
                updated: record.last_seen,
                uploaded: 0,
                downloaded: 0,
                left: 0,
            });
        }

        if !stale.is_empty() {
            debug!(target: "SWARM", %info_hash, evicted = stale.len(), "evicting stale peers");
            self.store.delete_fields(&key, &stale).await?;
        }

        peers.truncate(limit);

        Ok(peers)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use torrust_swarm_tracker_clock::clock::stopped::Stopped as _;
    use torrust_swarm_tracker_clock::clock::Time;
    use torrust_swarm_tracker_configuration::Store;
    use torrust_swarm_tracker_primitives::info_hash::InfoHash;
    use torrust_swarm_tracker_primitives::peer::fixture::PeerBuilder;
    use torrust_swarm_tracker_primitives::peer::{self, Peer};

    use crate::core::store::memory::Memory;
    use crate::core::store::KeyValueStore;
    use crate::core::swarm::SwarmDirectory;
    use crate::CurrentClock;

    const PEER_TTL: Duration = Duration::from_secs(3600);

    fn sample_info_hash() -> InfoHash {
        "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse::<InfoHash>().unwrap() // DevSkim: ignore DS173237
    }

    fn memory_store() -> Arc<Memory> {
        Arc::new(Memory::new(&Store::default()).unwrap())
    }

    fn swarm_directory(store: Arc<Memory>) -> SwarmDirectory {
        SwarmDirectory::new(store, "torrent:", PEER_TTL)
    }

    /// A peer that announced right now.
    fn peer_announced_now(id: i32, ip: &str) -> Peer {
        PeerBuilder::leecher()
            .with_peer_id(&peer::Id::from(id))
            .with_ip(ip)
            .with_port(6881)
            .last_updated_on(CurrentClock::now())
            .build()
    }

    #[test]
    fn it_should_use_the_prefix_and_the_hex_info_hash_as_key() {
        let swarms = swarm_directory(memory_store());

        assert_eq!(
            swarms.key(&sample_info_hash()),
            "torrent:3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0" // DevSkim: ignore DS173237
        );
    }

    #[tokio::test]
    async fn it_should_list_a_peer_after_it_is_upserted() {
        let swarms = swarm_directory(memory_store());
        let peer = peer_announced_now(1, "192.168.1.1");

        swarms.upsert_peer(&sample_info_hash(), &peer).await.unwrap();

        let peers = swarms.list_peers(&sample_info_hash(), 50).await.unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].peer_id, peer.peer_id);
        assert_eq!(peers[0].ip, "192.168.1.1");
        assert_eq!(peers[0].port, 6881);
    }

    #[tokio::test]
    async fn it_should_keep_one_record_per_peer_id() {
        let swarms = swarm_directory(memory_store());

        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(1, "192.168.1.1"))
            .await
            .unwrap();
        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(1, "192.168.1.2"))
            .await
            .unwrap();

        let peers = swarms.list_peers(&sample_info_hash(), 50).await.unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].ip, "192.168.1.2");
    }

    #[tokio::test]
    async fn it_should_not_list_a_removed_peer() {
        let swarms = swarm_directory(memory_store());
        let peer = peer_announced_now(1, "192.168.1.1");

        swarms.upsert_peer(&sample_info_hash(), &peer).await.unwrap();
        swarms.remove_peer(&sample_info_hash(), &peer.peer_id).await.unwrap();

        assert!(swarms.list_peers(&sample_info_hash(), 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_should_allow_removing_a_peer_that_is_not_in_the_swarm() {
        let swarms = swarm_directory(memory_store());

        assert!(swarms.remove_peer(&sample_info_hash(), &peer::Id::from(1)).await.is_ok());
    }

    #[tokio::test]
    async fn it_should_return_at_most_the_requested_number_of_peers() {
        let swarms = swarm_directory(memory_store());

        for id in 0..10 {
            swarms
                .upsert_peer(&sample_info_hash(), &peer_announced_now(id, "192.168.1.1"))
                .await
                .unwrap();
        }

        assert_eq!(swarms.list_peers(&sample_info_hash(), 3).await.unwrap().len(), 3);
        assert_eq!(swarms.list_peers(&sample_info_hash(), 0).await.unwrap().len(), 0);
        assert_eq!(swarms.list_peers(&sample_info_hash(), 50).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn it_should_keep_swarms_of_different_torrents_apart() {
        let swarms = swarm_directory(memory_store());
        let other_info_hash = InfoHash([1u8; 20]);

        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(1, "192.168.1.1"))
            .await
            .unwrap();

        assert!(swarms.list_peers(&other_info_hash, 50).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_should_stop_listing_a_peer_once_its_ttl_has_passed_and_delete_its_record() {
        CurrentClock::local_set(&Duration::from_secs(1_000_000));

        let store = memory_store();
        let swarms = swarm_directory(store.clone());

        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(1, "192.168.1.1"))
            .await
            .unwrap();

        CurrentClock::local_add(&Duration::from_secs(60)).unwrap();

        // It keeps the swarm alive but it does not refresh the first peer.
        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(2, "192.168.1.2"))
            .await
            .unwrap();

        CurrentClock::local_add(&(PEER_TTL - Duration::from_secs(30))).unwrap();

        let peers = swarms.list_peers(&sample_info_hash(), 50).await.unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].peer_id, peer::Id::from(2));

        let key = swarms.key(&sample_info_hash());
        let fields = store.get_all(&key).await.unwrap();
        assert_eq!(fields.len(), 1);

        CurrentClock::local_reset();
    }

    #[tokio::test]
    async fn it_should_skip_records_that_can_not_be_parsed() {
        let store = memory_store();
        let swarms = swarm_directory(store.clone());

        swarms
            .upsert_peer(&sample_info_hash(), &peer_announced_now(1, "192.168.1.1"))
            .await
            .unwrap();

        store
            .set_field(&swarms.key(&sample_info_hash()), b"garbage", "not a record", PEER_TTL)
            .await
            .unwrap();

        let peers = swarms.list_peers(&sample_info_hash(), 50).await.unwrap();

        assert_eq!(peers.len(), 1);
        assert_eq!(peers[0].peer_id, peer::Id::from(1));
    }
}
