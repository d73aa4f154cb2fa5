//! HTTP tracker job starter.
//!
//! The function [`http_tracker::start_job`](crate::bootstrap::jobs::http_tracker::start_job)
//! starts the HTTP tracker server and spawns a task that lives as long as the
//! server does.
//!
//! Refer to the [configuration documentation](https://docs.rs/torrust-swarm-tracker-configuration)
//! for the configuration options.
use std::sync::Arc;

use tokio::task::JoinHandle;
use torrust_swarm_tracker_configuration::HttpTracker;
use tracing::error;

use super::Started;
use crate::core;
use crate::servers::http::server::{Error, HttpServer, Launcher};

/// It starts a new HTTP server with the provided configuration.
///
/// The returned job finishes when the server shuts down, after a `ctrl_c` or
/// a `terminate` signal.
///
/// # Errors
///
/// Will return an error if the server can not bind to the configured address.
pub async fn start_job(config: &HttpTracker, tracker: Arc<core::Tracker>) -> Result<(Started, JoinHandle<()>), Error> {
    let server = HttpServer::new(Launcher::new(config.bind_address)).start(tracker).await?;

    let started = Started {
        address: server.state.binding,
    };

    let job = tokio::spawn(async move {
        if let Err(err) = server.wait().await {
            error!(target: "HTTP TRACKER", %err, "the http tracker did not finish cleanly");
        }
    });

    Ok((started, job))
}
