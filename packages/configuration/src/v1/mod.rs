//! Version `1` for [Torrust Swarm Tracker](https://docs.rs/torrust-swarm-tracker)
//! configuration data structures.
//!
//! Each section in the TOML structure is mapped to a data structure:
//!
//! - [`Logging`](crate::v1::logging::Logging)
//! - [`Core`](crate::v1::core::Core), with the announce and swarm policies
//! - [`Store`](crate::v1::store::Store)
//! - [`HttpTracker`](crate::v1::http_tracker::HttpTracker)
//!
//! Every option has a default, so an empty file is a valid configuration.
//!
//! ## Overriding options with env vars
//!
//! Any option can be overridden with an env var made of the prefix
//! `TORRUST_SWARM_TRACKER_CONFIG_OVERRIDE_` and the option path, using `__`
//! between levels. For example:
//!
//! ```text
//! TORRUST_SWARM_TRACKER_CONFIG_OVERRIDE_STORE__DRIVER=memory
//! TORRUST_SWARM_TRACKER_CONFIG_OVERRIDE_CORE__SWARM_POLICY__PEER_TTL=600
//! ```
//!
//! ## Default configuration
//!
//! ```toml
//! [logging]
//! threshold = "info"
//!
//! [core]
//! on_reverse_proxy = false
//!
//! [core.announce_policy]
//! interval = 1800
//!
//! [core.swarm_policy]
//! peer_ttl = 3600
//! default_numwant = 50
//! max_numwant = 200
//!
//! [store]
//! driver = "redis"
//! url = "redis://127.0.0.1:6379/"
//! key_prefix = "torrent:"
//! timeout_ms = 1000
//!
//! [http_tracker]
//! bind_address = "0.0.0.0:18312"
//! ```
pub mod core;
pub mod http_tracker;
pub mod logging;
pub mod store;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use self::core::Core;
use self::http_tracker::HttpTracker;
use self::logging::Logging;
use self::store::{Driver, Store};
use crate::validator::{SemanticValidationError, Validator};
use crate::{Error, Info, CONFIG_OVERRIDE_PREFIX, CONFIG_OVERRIDE_SEPARATOR};

/// Configuration for the tracker.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Core configuration.
    #[serde(default)]
    pub core: Core,

    /// Swarm store configuration.
    #[serde(default)]
    pub store: Store,

    /// The HTTP tracker configuration.
    #[serde(default)]
    pub http_tracker: HttpTracker,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct: the TOML string when
    /// present, the TOML file otherwise, then the env var overrides.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the sources can not be read or parsed, or if the
    /// resulting configuration is not valid.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Toml::string(config_toml))
        } else {
            Figment::from(Toml::file(&info.config_toml_path))
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    /// Loads the configuration from a TOML file, then the env var overrides.
    ///
    /// # Errors
    ///
    /// Will return `Err` if `path` does not exist or has a bad configuration.
    pub fn load_from_file(path: &str) -> Result<Configuration, Error> {
        Self::load(&Info {
            config_toml: None,
            config_toml_path: path.to_owned(),
        })
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a value can not be represented in TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl Validator for Configuration {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        let announce_policy = &self.core.announce_policy;
        let swarm_policy = &self.core.swarm_policy;

        if let Some(interval_min) = announce_policy.interval_min {
            if interval_min > announce_policy.interval {
                return Err(SemanticValidationError::MinIntervalGreaterThanInterval {
                    interval: announce_policy.interval,
                    interval_min,
                });
            }
        }

        if swarm_policy.default_numwant > swarm_policy.max_numwant {
            return Err(SemanticValidationError::DefaultNumwantGreaterThanMax {
                default_numwant: swarm_policy.default_numwant,
                max_numwant: swarm_policy.max_numwant,
            });
        }

        if swarm_policy.peer_ttl == 0 {
            return Err(SemanticValidationError::ZeroPeerTtl);
        }

        if self.store.timeout_ms == 0 {
            return Err(SemanticValidationError::ZeroStoreTimeout);
        }

        if self.store.driver == Driver::Redis {
            url::Url::parse(&self.store.url).map_err(|err| SemanticValidationError::InvalidStoreUrl {
                url: self.store.url.clone(),
                reason: err.to_string(),
            })?;
        }

        Ok(())
    }
}
