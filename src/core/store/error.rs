//! Key-value store errors.
//!
//! Every variant means the same thing to the tracker: the swarm could not be
//! read or written. The core maps all of them to
//! [`Error::StoreUnavailable`](crate::core::error::Error::StoreUnavailable).
use std::panic::Location;
use std::time::Duration;

use torrust_swarm_tracker_configuration::StoreDriver;

#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    /// Unable to open a connection to the store.
    #[error("Failed to connect to {driver} store: {message}, {location}")]
    ConnectionError {
        location: &'static Location<'static>,
        driver: StoreDriver,
        message: String,
    },

    /// The store rejected or failed a command.
    #[error("The {driver} store command failed: {message}, {location}")]
    CommandFailed {
        location: &'static Location<'static>,
        driver: StoreDriver,
        message: String,
    },

    /// The store did not answer in time.
    #[error("The {driver} store did not answer within {timeout:?}, {location}")]
    Timeout {
        location: &'static Location<'static>,
        driver: StoreDriver,
        timeout: Duration,
    },
}

impl Error {
    #[must_use]
    pub fn driver(&self) -> StoreDriver {
        match self {
            Error::ConnectionError { driver, .. } | Error::CommandFailed { driver, .. } | Error::Timeout { driver, .. } => *driver,
        }
    }
}

impl From<redis::RedisError> for Error {
    #[track_caller]
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            return Error::ConnectionError {
                location: Location::caller(),
                driver: StoreDriver::Redis,
                message: err.to_string(),
            };
        }

        Error::CommandFailed {
            location: Location::caller(),
            driver: StoreDriver::Redis,
            message: err.to_string(),
        }
    }
}
