//! Module to handle the HTTP server instances.
//!
//! [`HttpServer`] is a state machine: a [`Stopped`] server can be started,
//! which gives a [`Running`] one bound to a local address, and a running
//! server can be stopped again.
//!
//! ```text
//! HttpServer<Stopped> --start()--> HttpServer<Running> --stop()--> HttpServer<Stopped>
//! ```
use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot::{Receiver, Sender};
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::v1::routes::router;
use crate::core::Tracker;
use crate::servers::signals::{shutdown_signal_with_message, Halted};

/// Errors starting or stopping the HTTP server.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not bind to {bind_to}: {source} {location}")]
    UnableToBind {
        location: &'static Location<'static>,
        bind_to: SocketAddr,
        source: std::io::Error,
    },

    #[error("Could not stop the server: the halt channel was closed {location}")]
    HaltChannelClosed { location: &'static Location<'static> },

    #[error("The server task failed: {source} {location}")]
    TaskFailed {
        location: &'static Location<'static>,
        source: tokio::task::JoinError,
    },
}

/// Serves the tracker routes on an address.
#[derive(Debug, Clone, Copy)]
pub struct Launcher {
    pub bind_to: SocketAddr,
}

impl Launcher {
    #[must_use]
    pub fn new(bind_to: SocketAddr) -> Self {
        Self { bind_to }
    }

    /// Binds the listener and spawns the server task.
    ///
    /// The task finishes once `rx_halt` resolves and open connections are
    /// done.
    async fn start(&self, tracker: Arc<Tracker>, rx_halt: Receiver<Halted>) -> Result<(SocketAddr, JoinHandle<()>), Error> {
        let listener = TcpListener::bind(self.bind_to).await.map_err(|source| Error::UnableToBind {
            location: Location::caller(),
            bind_to: self.bind_to,
            source,
        })?;

        let local_addr = listener.local_addr().map_err(|source| Error::UnableToBind {
            location: Location::caller(),
            bind_to: self.bind_to,
            source,
        })?;

        let app = router(tracker, local_addr);

        let task = tokio::spawn(async move {
            let message = format!("Shutting down HTTP tracker on {local_addr}");

            let served = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .with_graceful_shutdown(shutdown_signal_with_message(rx_halt, message))
                .await;

            if let Err(err) = served {
                error!(target: "HTTP TRACKER", %err, "server stopped with an error");
            }
        });

        info!(target: "HTTP TRACKER", "Started on: http://{local_addr}");

        Ok((local_addr, task))
    }
}

/// A HTTP server controller.
#[allow(clippy::module_name_repetitions)]
pub struct HttpServer<S> {
    /// The state of the server: `running` or `stopped`.
    pub state: S,
}

/// A stopped HTTP server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running HTTP server state.
pub struct Running {
    /// The address the server is bound to. With port `0` in the configuration
    /// this is where the assigned port can be found.
    pub binding: SocketAddr,
    halt_task: Sender<Halted>,
    task: JoinHandle<()>,
    launcher: Launcher,
}

impl HttpServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `HttpServer` controller in `running`
    /// state.
    ///
    /// # Errors
    ///
    /// Will return an error if the server can not bind to its address.
    pub async fn start(self, tracker: Arc<Tracker>) -> Result<HttpServer<Running>, Error> {
        let (tx_halt, rx_halt) = tokio::sync::oneshot::channel::<Halted>();

        let launcher = self.state.launcher;

        let (binding, task) = launcher.start(tracker, rx_halt).await?;

        Ok(HttpServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
                launcher,
            },
        })
    }
}

impl HttpServer<Running> {
    /// It stops the server and returns a `HttpServer` controller in `stopped`
    /// state.
    ///
    /// # Errors
    ///
    /// Will return an error if the server task is already gone or it panicked.
    pub async fn stop(self) -> Result<HttpServer<Stopped>, Error> {
        self.state.halt_task.send(Halted::Normal).map_err(|_| Error::HaltChannelClosed {
            location: Location::caller(),
        })?;

        self.state.task.await.map_err(|source| Error::TaskFailed {
            location: Location::caller(),
            source,
        })?;

        Ok(HttpServer {
            state: Stopped {
                launcher: self.state.launcher,
            },
        })
    }

    /// Waits until the server task finishes, for example after a `ctrl_c`.
    ///
    /// # Errors
    ///
    /// Will return an error if the server task panicked.
    pub async fn wait(self) -> Result<(), Error> {
        let Running { halt_task, task, .. } = self.state;

        let result = task.await.map_err(|source| Error::TaskFailed {
            location: Location::caller(),
            source,
        });

        drop(halt_task);

        result
    }
}
