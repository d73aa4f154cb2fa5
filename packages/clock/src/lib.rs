//! Time related functions and types.
//!
//! Every place that needs "now" goes through a clock so that tests can stop
//! time and move it forward, for example to watch a peer expire without
//! waiting for its TTL.
//!
//! Clocks use the type `DurationSinceUnixEpoch` which is a
//! `std::time::Duration` since the Unix Epoch (timestamp). The timestamp does
//! not depend on the time zone of the host.
//!
//! The alias below has to be copied into each crate that reads the time, so
//! that its own unit tests get the stopped clock:
//!
//! ```rust,ignore
//! #[cfg(not(test))]
//! pub(crate) type CurrentClock = torrust_swarm_tracker_clock::clock::Working;
//!
//! #[cfg(test)]
//! pub(crate) type CurrentClock = torrust_swarm_tracker_clock::clock::Stopped;
//! ```
pub mod clock;
pub mod conv;
pub mod static_time;

#[macro_use]
extern crate lazy_static;

/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = clock::Stopped;
