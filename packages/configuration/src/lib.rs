//! Configuration data structures for the [Torrust Swarm Tracker](https://docs.rs/torrust-swarm-tracker).
//!
//! The configuration is loaded from a [TOML](https://toml.io/en/) file or from
//! an environment variable with the same content as the file. Single values
//! can then be overridden with environment variables.
//!
//! The current version for configuration is [`v1`].
pub mod v1;
pub mod validator;

use std::env;
use std::panic::Location;

use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Environment variables

/// The whole `tracker.toml` file content. It has priority over the config file.
/// Even if the file is not on the default path.
const ENV_VAR_CONFIG_TOML: &str = "TORRUST_SWARM_TRACKER_CONFIG_TOML";

/// The `tracker.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "TORRUST_SWARM_TRACKER_CONFIG_TOML_PATH";

/// Prefix for env vars that overwrite configuration options.
const CONFIG_OVERRIDE_PREFIX: &str = "TORRUST_SWARM_TRACKER_CONFIG_OVERRIDE_";

/// Path separator in env var names for nested values in configuration.
const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// Default path of the configuration file, relative to the working directory.
pub const DEFAULT_PATH_CONFIG: &str = "./share/default/config/tracker.toml";

pub type Configuration = v1::Configuration;
pub type Logging = v1::logging::Logging;
pub type Threshold = v1::logging::Threshold;
pub type Core = v1::core::Core;
pub type Store = v1::store::Store;
pub type StoreDriver = v1::store::Driver;
pub type HttpTracker = v1::http_tracker::HttpTracker;

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: String,
}

impl Info {
    /// Build Configuration Info
    ///
    /// The whole configuration can be passed in the
    /// `TORRUST_SWARM_TRACKER_CONFIG_TOML` env var. Otherwise it is read from
    /// the file in `TORRUST_SWARM_TRACKER_CONFIG_TOML_PATH`, or from
    /// `default_config_toml_path` when that env var is not set either.
    ///
    /// # Errors
    ///
    /// Will return `Err` if unable to obtain a configuration.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(default_config_toml_path: String) -> Result<Self, Error> {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = if let Ok(config_toml_path) = env::var(ENV_VAR_CONFIG_TOML_PATH) {
            println!("Loading configuration from file: `{config_toml_path}` ...");
            config_toml_path
        } else {
            println!("Loading configuration from default configuration file: `{default_config_toml_path}` ...");
            default_config_toml_path
        };

        Ok(Self {
            config_toml,
            config_toml_path,
        })
    }

    /// Info for a configuration given as a TOML string.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: DEFAULT_PATH_CONFIG.to_owned(),
        }
    }
}

/// Announce policy: what the tracker tells clients about re-announcing.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Constructor)]
pub struct AnnouncePolicy {
    /// Interval in seconds that the client should wait between sending regular
    /// announce requests to the tracker.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,

    /// Minimum announce interval. Clients must not reannounce more frequently
    /// than this. Only sent in the response when it is set.
    #[serde(default = "AnnouncePolicy::default_interval_min")]
    pub interval_min: Option<u32>,

    /// Identifier clients should send back as `trackerid` in later
    /// announces. Only sent in the response when it is set.
    #[serde(default = "AnnouncePolicy::default_tracker_id")]
    pub tracker_id: Option<String>,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            interval_min: Self::default_interval_min(),
            tracker_id: Self::default_tracker_id(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        1800
    }

    fn default_interval_min() -> Option<u32> {
        None
    }

    fn default_tracker_id() -> Option<String> {
        None
    }
}

/// Swarm policy: how long peers are kept and how many are returned.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Constructor)]
pub struct SwarmPolicy {
    /// Seconds a peer stays in the swarm after its last announce.
    #[serde(default = "SwarmPolicy::default_peer_ttl")]
    pub peer_ttl: u32,

    /// Peers returned when the client does not send `numwant`.
    #[serde(default = "SwarmPolicy::default_numwant")]
    pub default_numwant: u32,

    /// Upper bound for `numwant`, whatever the client asks for.
    #[serde(default = "SwarmPolicy::default_max_numwant")]
    pub max_numwant: u32,
}

impl Default for SwarmPolicy {
    fn default() -> Self {
        Self {
            peer_ttl: Self::default_peer_ttl(),
            default_numwant: Self::default_numwant(),
            max_numwant: Self::default_max_numwant(),
        }
    }
}

impl SwarmPolicy {
    fn default_peer_ttl() -> u32 {
        3600
    }

    fn default_numwant() -> u32 {
        50
    }

    fn default_max_numwant() -> u32 {
        200
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Unable to load or parse the configuration sources.
    #[error("Failed processing the configuration: {source} {location}")]
    ConfigError {
        location: &'static Location<'static>,
        source: Box<figment::Error>,
    },

    /// The configuration parsed but some values do not fit together.
    #[error("Invalid configuration: {source} {location}")]
    Invalid {
        location: &'static Location<'static>,
        source: validator::SemanticValidationError,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            location: Location::caller(),
            source: Box::new(err),
        }
    }
}

impl From<validator::SemanticValidationError> for Error {
    #[track_caller]
    fn from(err: validator::SemanticValidationError) -> Self {
        Self::Invalid {
            location: Location::caller(),
            source: err,
        }
    }
}
