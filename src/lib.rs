//! **Torrust Swarm Tracker** is a [`BitTorrent`](https://www.bittorrent.org/)
//! HTTP tracker that keeps its swarms in a key-value store.
//!
//! - [Introduction](#introduction)
//! - [Features](#features)
//! - [Configuration](#configuration)
//! - [Usage](#usage)
//! - [Components](#components)
//! - [Console](#console)
//!
//! # Introduction
//!
//! The tracker answers `announce` requests: a peer tells the tracker it is
//! sharing a torrent and gets back other peers sharing the same torrent.
//!
//! Swarms are not kept in the tracker process. Each swarm is a hash in a
//! key-value store (Redis in production), so several tracker instances can
//! share the same swarms and a restart does not forget them. Peers that stop
//! announcing expire after a configurable TTL.
//!
//! # Features
//!
//! - HTTP tracker, `GET /announce` (also on `/tracker`).
//! - Compact ([BEP 23](https://www.bittorrent.org/beps/bep_0023.html)) and
//!   non-compact peer lists.
//! - Redis or in-memory swarm store.
//! - Reverse proxy support through `X-Forwarded-For`.
//! - `GET /health_check`.
//! - A small bencode library with typed schemas.
//! - `torrent_info`, a console tool that prints a `.torrent` file summary.
//!
//! # Configuration
//!
//! The configuration is loaded from `./share/default/config/tracker.toml` or
//! from the `TORRUST_SWARM_TRACKER_CONFIG_TOML` env var. Refer to the
//! [configuration crate](https://docs.rs/torrust-swarm-tracker-configuration)
//! for all the options.
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
//!
//! Single values can be overridden with env vars, for example
//! `TORRUST_SWARM_TRACKER_CONFIG_OVERRIDE_STORE__DRIVER=memory`.
//!
//! # Usage
//!
//! ```text
//! cargo run
//! ```
//!
//! With the memory store, no Redis needed:
//!
//! ```text
//! TORRUST_SWARM_TRACKER_CONFIG_TOML_PATH=./share/default/config/tracker.development.memory.toml cargo run
//! ```
//!
//! # Components
//!
//! - [`core`]: the domain tracker, the swarm directory and the store drivers.
//! - [`servers`]: the HTTP tracker, built with [Axum](https://docs.rs/axum).
//! - [`bootstrap`]: configuration, logging and job setup.
//! - [`console`]: console applications.
//!
//! # Console
//!
//! ```text
//! cargo run --bin torrent_info -- ./path/to/file.torrent
//! ```
pub mod app;
pub mod bootstrap;
pub mod console;
pub mod core;
pub mod servers;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_swarm_tracker_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = torrust_swarm_tracker_clock::clock::Stopped;
