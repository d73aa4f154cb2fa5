//! Torrust Swarm Tracker application.
//!
//! The tracker application has a global configuration for its jobs. It's
//! basically a container for other services.
//!
//! Jobs executed always:
//!
//! - HTTP tracker.
//!
//! The swarm store is checked once at start. A store that does not answer is
//! reported but does not stop the tracker: announces fail with a `500` until
//! it comes back.
use std::sync::Arc;

use tokio::task::JoinHandle;
use torrust_swarm_tracker_configuration::Configuration;
use tracing::{info, warn};

use crate::bootstrap::jobs::http_tracker;
use crate::core;
use crate::servers::http::server;

/// It starts the application jobs.
///
/// # Errors
///
/// Will return an error if the HTTP tracker can not be started.
pub async fn start(config: &Configuration, tracker: Arc<core::Tracker>) -> Result<Vec<JoinHandle<()>>, server::Error> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    match tracker.check_store().await {
        Ok(()) => info!(target: "TRACKER", driver = %config.store.driver, "swarm store is reachable"),
        Err(err) => warn!(target: "TRACKER", driver = %config.store.driver, %err, "swarm store is not reachable"),
    }

    // Start the HTTP tracker
    let (started, job) = http_tracker::start_job(&config.http_tracker, tracker).await?;

    info!(target: "TRACKER", address = %started.address, "HTTP tracker started");

    jobs.push(job);

    Ok(jobs)
}
