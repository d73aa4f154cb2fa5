//! Testing helpers for [Torrust Swarm Tracker](https://docs.rs/torrust-swarm-tracker).
//!
//! A collection of functions and types that are used in the tests of the
//! tracker and its packages.
pub mod configuration;
pub mod random;
