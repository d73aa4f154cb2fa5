//! Resolves the IP stored for the announcing peer.
//!
//! Order of precedence:
//!
//! 1. The `ip` query param, as sent. It may be any text the client chooses,
//!    including a host name.
//! 2. With `core.on_reverse_proxy = true`, the right-most `X-Forwarded-For`
//!    address.
//! 3. Otherwise, the remote address of the connection.
//!
//! When the address has to come from the request and the expected source is
//! missing, the announce fails.
use std::net::IpAddr;
use std::panic::Location;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::servers::http::v1::responses;

/// Addresses of the client found in the request.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
pub struct ClientIpSources {
    /// The right most IP from the `X-Forwarded-For` HTTP header.
    pub right_most_x_forwarded_for: Option<IpAddr>,
    /// The IP from the connection info.
    pub connection_info_ip: Option<IpAddr>,
}

#[derive(Error, Debug)]
pub enum PeerIpResolutionError {
    /// The tracker runs behind a reverse proxy but the request has no usable
    /// `X-Forwarded-For` header.
    #[error("missing or invalid X-Forwarded-For header (the tracker runs behind a reverse proxy) in {location}")]
    MissingRightMostXForwardedForIp { location: &'static Location<'static> },
    /// The connection info was not made available to the handlers.
    #[error("cannot get the client IP from the connection info in {location}")]
    MissingClientIp { location: &'static Location<'static> },
}

impl From<PeerIpResolutionError> for responses::error::Error {
    fn from(err: PeerIpResolutionError) -> Self {
        match err {
            PeerIpResolutionError::MissingRightMostXForwardedForIp { .. } => {
                responses::error::Error::malformed_request(&format!("Error resolving peer IP: {err}"))
            }
            PeerIpResolutionError::MissingClientIp { .. } => {
                responses::error::Error::internal(&format!("Error resolving peer IP: {err}"))
            }
        }
    }
}

/// Resolves the textual IP of the announcing peer.
///
/// ```rust
/// use std::net::IpAddr;
///
/// use torrust_swarm_tracker::servers::http::v1::services::peer_ip_resolver::{resolve, ClientIpSources};
///
/// let sources = ClientIpSources {
///     right_most_x_forwarded_for: Some("203.0.113.195".parse::<IpAddr>().unwrap()),
///     connection_info_ip: Some("10.0.0.1".parse::<IpAddr>().unwrap()),
/// };
///
/// assert_eq!(resolve(true, None, &sources).unwrap(), "203.0.113.195");
/// assert_eq!(resolve(false, None, &sources).unwrap(), "10.0.0.1");
/// assert_eq!(resolve(false, Some("198.51.100.7"), &sources).unwrap(), "198.51.100.7");
/// ```
///
/// # Errors
///
/// Will return an error if there is no `ip` param and the address can not be
/// taken from the source the configuration points to.
pub fn resolve(
    on_reverse_proxy: bool,
    announced_ip: Option<&str>,
    client_ip_sources: &ClientIpSources,
) -> Result<String, PeerIpResolutionError> {
    if let Some(ip) = announced_ip {
        return Ok(ip.to_owned());
    }

    observed_ip(on_reverse_proxy, client_ip_sources).map(|ip| ip.to_string())
}

/// The address the request came from, ignoring the `ip` param.
///
/// # Errors
///
/// Will return an error if the source the configuration points to is missing.
pub fn observed_ip(on_reverse_proxy: bool, client_ip_sources: &ClientIpSources) -> Result<IpAddr, PeerIpResolutionError> {
    if on_reverse_proxy {
        client_ip_sources
            .right_most_x_forwarded_for
            .ok_or_else(|| PeerIpResolutionError::MissingRightMostXForwardedForIp {
                location: Location::caller(),
            })
    } else {
        client_ip_sources
            .connection_info_ip
            .ok_or_else(|| PeerIpResolutionError::MissingClientIp {
                location: Location::caller(),
            })
    }
}
