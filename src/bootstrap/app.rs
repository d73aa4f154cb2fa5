//! Setup for the main tracker application.
//!
//! The [`setup`] only builds the application and its dependencies but it does
//! not start the application. In fact, there is no such thing as the main
//! application process. When the application starts, the only thing it does is
//! starting a bunch of independent jobs. If you are looking for how things are
//! started you should read [`app::start`](crate::app::start) function
//! documentation.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Initialize the domain tracker.
use std::sync::Arc;

use thiserror::Error;
use torrust_swarm_tracker_clock::static_time;
use torrust_swarm_tracker_configuration::Configuration;

use super::config::initialize_configuration;
use crate::bootstrap;
use crate::core::{store, Tracker};

/// Errors that prevent the application from being built.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Configuration(#[from] torrust_swarm_tracker_configuration::Error),

    #[error("{0}")]
    Store(#[from] store::error::Error),
}

/// It loads the configuration from the environment and builds the main domain [`Tracker`] struct.
///
/// # Errors
///
/// Will return an error if the configuration can not be loaded or the swarm
/// store client can not be built.
pub fn setup() -> Result<(Configuration, Arc<Tracker>), Error> {
    let configuration = initialize_configuration()?;

    let tracker = initialize_with_configuration(&configuration)?;

    Ok((configuration, tracker))
}

/// It initializes the application with the given configuration.
///
/// The configuration may be obtained from the environment (via config file or
/// env vars).
///
/// # Errors
///
/// Will return an error if the swarm store client can not be built.
pub fn initialize_with_configuration(configuration: &Configuration) -> Result<Arc<Tracker>, store::error::Error> {
    initialize_static();
    initialize_logging(configuration);
    Ok(Arc::new(initialize_tracker(configuration)?))
}

/// It initializes the application static values.
///
/// These values are accessible throughout the entire application:
///
/// - The time when the application started.
pub fn initialize_static() {
    // Set the time of Torrust app starting
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It builds the domain tracker.
///
/// The tracker is the domain layer service. It's the entrypoint to make requests
/// to the domain layer. The Redis client connects on first use, so building it
/// does not need a running Redis.
///
/// # Errors
///
/// Will return an error if the store url is not valid.
pub fn initialize_tracker(config: &Configuration) -> Result<Tracker, store::error::Error> {
    Tracker::new(&config.core, &config.store)
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info about logging.
pub fn initialize_logging(config: &Configuration) {
    bootstrap::logging::setup(config);
}
