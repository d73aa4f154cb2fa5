use std::sync::Arc;

use torrust_swarm_tracker::bootstrap::app::initialize_with_configuration;
use torrust_swarm_tracker::core::Tracker;
use torrust_swarm_tracker::servers::http::server::{HttpServer, Launcher, Running, Stopped};
use torrust_swarm_tracker_clock::clock::{Time, Working};
use torrust_swarm_tracker_configuration::Configuration;
use torrust_swarm_tracker_primitives::info_hash::InfoHash;
use torrust_swarm_tracker_primitives::peer;

pub struct Environment<S> {
    pub config: Configuration,
    pub tracker: Arc<Tracker>,
    pub server: HttpServer<S>,
}

impl<S> Environment<S> {
    /// Add a peer to a swarm without going through the HTTP server.
    ///
    /// The peer is stamped as seen now, otherwise the swarm would drop it as expired.
    pub async fn add_torrent_peer(&self, info_hash: &InfoHash, peer: &peer::Peer) {
        let mut peer = peer.clone();
        peer.updated = Working::now();

        self.tracker.swarms().upsert_peer(info_hash, &peer).await.unwrap();
    }
}

impl Environment<Stopped> {
    pub fn new(configuration: &Configuration) -> Self {
        let tracker = initialize_with_configuration(configuration).unwrap();

        let server = HttpServer::new(Launcher::new(configuration.http_tracker.bind_address));

        Self {
            config: configuration.clone(),
            tracker,
            server,
        }
    }

    pub async fn start(self) -> Environment<Running> {
        Environment {
            config: self.config,
            tracker: self.tracker.clone(),
            server: self.server.start(self.tracker).await.unwrap(),
        }
    }
}

impl Environment<Running> {
    pub async fn new(configuration: &Configuration) -> Self {
        Environment::<Stopped>::new(configuration).start().await
    }

    pub async fn stop(self) -> Environment<Stopped> {
        Environment {
            config: self.config,
            tracker: self.tracker,
            server: self.server.stop().await.unwrap(),
        }
    }

    pub fn bind_address(&self) -> &std::net::SocketAddr {
        &self.server.state.binding
    }
}
