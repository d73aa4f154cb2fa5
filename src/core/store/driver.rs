//! Store driver factory.
//!
//! See [`store::driver::build`](crate::core::store::driver::build)
//! function for more information.
use torrust_swarm_tracker_configuration::{Store, StoreDriver};

use super::error::Error;
use super::memory::Memory;
use super::redis::Redis;
use super::{Builder, KeyValueStore};

/// It builds the store client selected in the configuration.
///
/// Example for `Redis`:
///
/// ```rust,no_run
/// use torrust_swarm_tracker::core::store;
/// use torrust_swarm_tracker_configuration::Store;
///
/// let config = Store::default();
/// let store = store::driver::build(&config);
/// ```
///
/// The Redis client connects lazily, on the first command. A tracker can
/// start before Redis is up; announces fail until it is reachable.
///
/// # Errors
///
/// This function will return an error if the store url can not be parsed.
pub fn build(config: &Store) -> Result<Box<dyn KeyValueStore>, Error> {
    match config.driver {
        StoreDriver::Redis => Builder::<Redis>::build(config),
        StoreDriver::Memory => Builder::<Memory>::build(config),
    }
}
