use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use torrust_swarm_tracker_configuration::{Configuration, StoreDriver, Threshold};

use crate::random;

/// This configuration is used for testing. It generates random config values so they do not collide
/// if you run more than one tracker at the same time.
///
/// It uses the in-process memory store, so no Redis server is needed.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    // Ephemeral socket address for HTTP tracker
    let http_port = 0u16;
    config.http_tracker.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), http_port);

    config.store.driver = StoreDriver::Memory;
    config.store.key_prefix = format!("torrent:{}:", random::string(16));

    config
}

/// Ephemeral configuration with reverse proxy enabled.
#[must_use]
pub fn ephemeral_with_reverse_proxy() -> Configuration {
    let mut cfg = ephemeral();

    cfg.core.on_reverse_proxy = true;

    cfg
}

/// Ephemeral configuration with reverse proxy disabled.
#[must_use]
pub fn ephemeral_without_reverse_proxy() -> Configuration {
    let mut cfg = ephemeral();

    cfg.core.on_reverse_proxy = false;

    cfg
}

/// Ephemeral configuration that also sends `min interval` and `tracker id`.
#[must_use]
pub fn ephemeral_with_full_announce_policy() -> Configuration {
    let mut cfg = ephemeral();

    cfg.core.announce_policy.interval_min = Some(900);
    cfg.core.announce_policy.tracker_id = Some(format!("tracker-{}", random::string(8)));

    cfg
}
