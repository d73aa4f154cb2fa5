//! Primitive types for the [Torrust Swarm Tracker](https://docs.rs/torrust-swarm-tracker).
//!
//! These structures are shared by the tracker core, its HTTP delivery layer
//! and the console tools.
use std::time::Duration;

pub mod announce_event;
pub mod info_hash;
pub mod peer;
pub mod swarm_metadata;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;
