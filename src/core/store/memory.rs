//! The in-process store.
//!
//! It mimics the part of Redis the tracker uses: hashes with an expiry on the
//! whole hash. Expired hashes are dropped when they are next touched, and
//! every [`SWEEP_EVERY`] writes the whole map is swept for the rest.
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use torrust_swarm_tracker_clock::clock::Time;
use torrust_swarm_tracker_configuration::{Store, StoreDriver};
use torrust_swarm_tracker_primitives::DurationSinceUnixEpoch;

use super::error::Error;
use super::{Fields, KeyValueStore};
use crate::CurrentClock;

/// Number of writes between two sweeps of expired hashes.
pub const SWEEP_EVERY: u64 = 1024;

#[derive(Debug, Default)]
struct Hash {
    fields: Fields,
    expires_at: DurationSinceUnixEpoch,
}

impl Hash {
    fn is_expired(&self, now: DurationSinceUnixEpoch) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct Memory {
    hashes: DashMap<String, Hash>,
    writes: AtomicU64,
}

impl Memory {
    /// Number of hashes held. Expired ones are counted until they are touched
    /// or swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Drops every expired hash.
    pub fn remove_expired(&self) {
        let now = CurrentClock::now();

        self.hashes.retain(|_, hash| !hash.is_expired(now));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for Memory {
    fn new(_config: &Store) -> Result<Self, Error> {
        Ok(Self::default())
    }

    fn driver(&self) -> StoreDriver {
        StoreDriver::Memory
    }

    async fn set_field(&self, key: &str, field: &[u8], value: &str, ttl: Duration) -> Result<(), Error> {
        let now = CurrentClock::now();

        {
            let mut hash = self.hashes.entry(key.to_owned()).or_default();

            if hash.is_expired(now) {
                hash.fields.clear();
            }

            hash.fields.insert(field.to_vec(), value.to_owned());
            hash.expires_at = now.saturating_add(ttl);
        }

        // The entry guard must be released first, `retain` locks every shard.
        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.remove_expired();
        }

        Ok(())
    }

    async fn get_all(&self, key: &str) -> Result<Fields, Error> {
        let now = CurrentClock::now();

        if self.hashes.remove_if(key, |_, hash| hash.is_expired(now)).is_some() {
            return Ok(Fields::new());
        }

        Ok(self.hashes.get(key).map(|hash| hash.fields.clone()).unwrap_or_default())
    }

    async fn delete_fields(&self, key: &str, fields: &[Vec<u8>]) -> Result<(), Error> {
        if let Some(mut hash) = self.hashes.get_mut(key) {
            for field in fields {
                hash.fields.remove(field);
            }
        }

        // Redis drops a hash with no fields left.
        self.hashes.remove_if(key, |_, hash| hash.fields.is_empty());

        Ok(())
    }

    async fn ping(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use torrust_swarm_tracker_clock::clock::stopped::Stopped as _;
    use torrust_swarm_tracker_clock::clock::Time;
    use torrust_swarm_tracker_configuration::Store;

    use crate::core::store::memory::{Memory, SWEEP_EVERY};
    use crate::core::store::KeyValueStore;
    use crate::CurrentClock;

    const TTL: Duration = Duration::from_secs(3600);

    fn store() -> Memory {
        Memory::new(&Store::default()).unwrap()
    }

    #[tokio::test]
    async fn it_should_return_the_fields_set_in_a_hash() {
        let store = store();

        store.set_field("swarm", b"peer-1", "127.0.0.1:6881:0", TTL).await.unwrap();
        store.set_field("swarm", b"peer-2", "127.0.0.2:6881:0", TTL).await.unwrap();

        let fields = store.get_all("swarm").await.unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get(b"peer-1".as_slice()), Some(&"127.0.0.1:6881:0".to_string()));
    }

    #[tokio::test]
    async fn it_should_overwrite_a_field_that_is_set_again() {
        let store = store();

        store.set_field("swarm", b"peer-1", "old", TTL).await.unwrap();
        store.set_field("swarm", b"peer-1", "new", TTL).await.unwrap();

        let fields = store.get_all("swarm").await.unwrap();

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(b"peer-1".as_slice()), Some(&"new".to_string()));
    }

    #[tokio::test]
    async fn it_should_return_an_empty_hash_for_a_missing_key() {
        let store = store();

        assert!(store.get_all("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn it_should_delete_only_the_given_fields() {
        let store = store();

        store.set_field("swarm", b"peer-1", "a", TTL).await.unwrap();
        store.set_field("swarm", b"peer-2", "b", TTL).await.unwrap();

        store
            .delete_fields("swarm", &[b"peer-1".to_vec(), b"not-there".to_vec()])
            .await
            .unwrap();

        let fields = store.get_all("swarm").await.unwrap();

        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key(b"peer-2".as_slice()));
    }

    #[tokio::test]
    async fn it_should_drop_a_hash_when_its_last_field_is_deleted() {
        let store = store();

        store.set_field("swarm", b"peer-1", "a", TTL).await.unwrap();
        store.delete_fields("swarm", &[b"peer-1".to_vec()]).await.unwrap();

        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn it_should_expire_the_whole_hash_after_its_ttl() {
        CurrentClock::local_set(&Duration::from_secs(1_000_000));

        let store = store();

        store.set_field("swarm", b"peer-1", "a", TTL).await.unwrap();

        CurrentClock::local_add(&(TTL - Duration::from_secs(1))).unwrap();
        assert_eq!(store.get_all("swarm").await.unwrap().len(), 1);

        CurrentClock::local_add(&Duration::from_secs(1)).unwrap();
        assert!(store.get_all("swarm").await.unwrap().is_empty());
        assert!(store.is_empty());

        CurrentClock::local_reset();
    }

    #[tokio::test]
    async fn it_should_refresh_the_expiry_of_the_hash_on_every_set() {
        CurrentClock::local_set(&Duration::from_secs(1_000_000));

        let store = store();

        store.set_field("swarm", b"peer-1", "a", TTL).await.unwrap();

        CurrentClock::local_add(&Duration::from_secs(3000)).unwrap();
        store.set_field("swarm", b"peer-2", "b", TTL).await.unwrap();

        CurrentClock::local_add(&Duration::from_secs(3000)).unwrap();
        assert_eq!(store.get_all("swarm").await.unwrap().len(), 2);

        CurrentClock::local_reset();
    }

    #[tokio::test]
    async fn it_should_reclaim_expired_hashes_that_are_never_touched_again() {
        CurrentClock::local_set(&Duration::from_secs(1_000_000));

        let store = store();

        for i in 0..10 {
            store.set_field(&format!("abandoned-{i}"), b"peer-1", "a", TTL).await.unwrap();
        }

        CurrentClock::local_add(&TTL).unwrap();

        store.set_field("live", b"peer-1", "a", TTL).await.unwrap();
        assert_eq!(store.len(), 11);

        let writes_so_far = 11;
        for _ in writes_so_far..SWEEP_EVERY {
            store.set_field("live", b"peer-1", "a", TTL).await.unwrap();
        }

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all("live").await.unwrap().len(), 1);

        CurrentClock::local_reset();
    }

    #[tokio::test]
    async fn it_should_drop_only_expired_hashes_when_removing_expired_ones() {
        CurrentClock::local_set(&Duration::from_secs(1_000_000));

        let store = store();

        store.set_field("old", b"peer-1", "a", Duration::from_secs(10)).await.unwrap();
        store.set_field("new", b"peer-1", "a", TTL).await.unwrap();

        CurrentClock::local_add(&Duration::from_secs(10)).unwrap();
        store.remove_expired();

        assert_eq!(store.len(), 1);
        assert!(store.get_all("old").await.unwrap().is_empty());
        assert_eq!(store.get_all("new").await.unwrap().len(), 1);

        CurrentClock::local_reset();
    }

    #[tokio::test]
    async fn it_should_always_answer_a_ping() {
        assert!(store().ping().await.is_ok());
    }
}
