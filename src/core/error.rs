//! Errors returned by the core `Tracker`.
//!
//! Error | Context | Description
//! ---|---|---
//! `StoreUnavailable` | Swarm directory | The key-value store could not be reached, failed the command or timed out.
//!
//! Malformed announce requests never reach the core. The HTTP extractors
//! reject them first.
use std::panic::Location;

use super::store;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("The swarm store is unavailable: {source}, {location}")]
    StoreUnavailable {
        location: &'static Location<'static>,
        source: store::error::Error,
    },
}

impl From<store::error::Error> for Error {
    #[track_caller]
    fn from(err: store::error::Error) -> Self {
        Error::StoreUnavailable {
            location: Location::caller(),
            source: err,
        }
    }
}
