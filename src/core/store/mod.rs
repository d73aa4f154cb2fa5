//! The shared key-value store holding the swarms.
//!
//! The tracker only needs a tiny subset of a key-value store: hashes of
//! string values with an expiry on the whole hash. This module defines that
//! subset as the [`KeyValueStore`] trait so the [`SwarmDirectory`](crate::core::swarm::SwarmDirectory)
//! does not depend on a concrete client.
//!
//! There are two implementations:
//!
//! Driver | Use
//! ---|---
//! [`Redis`](crate::core::store::redis::Redis) | Production. Several tracker instances can share one swarm directory.
//! [`Memory`](crate::core::store::memory::Memory) | Tests and single instance deployments.
//!
//! Use [`driver::build`](crate::core::store::driver::build) to get the one
//! selected in the [`Store`](torrust_swarm_tracker_configuration::Store)
//! configuration.
pub mod driver;
pub mod error;
pub mod memory;
pub mod redis;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use torrust_swarm_tracker_configuration::{Store, StoreDriver};

use self::error::Error;

/// All the fields of one hash: raw field name to value.
pub type Fields = HashMap<Vec<u8>, String>;

pub(crate) struct Builder<T>
where
    T: KeyValueStore,
{
    phantom: PhantomData<T>,
}

impl<T> Builder<T>
where
    T: KeyValueStore + 'static,
{
    /// .
    ///
    /// # Errors
    ///
    /// Will return `store::Error` if unable to build the store client.
    pub(crate) fn build(config: &Store) -> Result<Box<dyn KeyValueStore>, Error> {
        Ok(Box::new(T::new(config)?))
    }
}

/// The store operations the swarm directory relies on.
///
/// Field names are raw bytes (peer ids are not always valid UTF-8) and values
/// are strings.
#[async_trait]
pub trait KeyValueStore: Sync + Send {
    /// It instantiates a new store client.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration can not be used to reach the store.
    fn new(config: &Store) -> Result<Self, Error>
    where
        Self: Sized;

    /// The driver behind this store.
    fn driver(&self) -> StoreDriver;

    /// Sets one field of the hash at `key` and, in the same atomic operation,
    /// (re)sets the expiry of the whole hash to `ttl`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store is unreachable or the command fails.
    async fn set_field(&self, key: &str, field: &[u8], value: &str, ttl: Duration) -> Result<(), Error>;

    /// Returns every field of the hash at `key`. A missing or expired key is an
    /// empty hash.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store is unreachable or the command fails.
    async fn get_all(&self, key: &str) -> Result<Fields, Error>;

    /// Deletes the given fields from the hash at `key`. Fields that do not
    /// exist are ignored.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store is unreachable or the command fails.
    async fn delete_fields(&self, key: &str, fields: &[Vec<u8>]) -> Result<(), Error>;

    /// Checks the store answers.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the store is unreachable.
    async fn ping(&self) -> Result<(), Error>;
}
