use std::time::Duration;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Shared key-value store holding the swarms.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Store {
    /// Store driver. Possible values are: `redis` and `memory`.
    #[serde(default = "Store::default_driver")]
    pub driver: Driver,

    /// Store connection url. Only used by the `redis` driver, for example
    /// `redis://127.0.0.1:6379/`.
    #[serde(default = "Store::default_url")]
    pub url: String,

    /// Prefix of the key holding each swarm. The hex info hash follows it.
    #[serde(default = "Store::default_key_prefix")]
    pub key_prefix: String,

    /// Maximum time in milliseconds a single store call may take.
    #[serde(default = "Store::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            driver: Self::default_driver(),
            url: Self::default_url(),
            key_prefix: Self::default_key_prefix(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl Store {
    fn default_driver() -> Driver {
        Driver::Redis
    }

    fn default_url() -> String {
        String::from("redis://127.0.0.1:6379/")
    }

    fn default_key_prefix() -> String {
        String::from("torrent:")
    }

    fn default_timeout_ms() -> u64 {
        1000
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// The store drivers the tracker can use.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Hash, Clone, Copy, Display)]
#[serde(rename_all = "lowercase")]
pub enum Driver {
    /// Redis, shared between tracker instances.
    #[display("redis")]
    Redis,
    /// In-process map, for tests and single instance deployments.
    #[display("memory")]
    Memory,
}
