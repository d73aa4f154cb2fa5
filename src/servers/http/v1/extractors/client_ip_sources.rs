//! Axum [`extractor`](axum::extract) collecting every address the client IP
//! could be taken from.
//!
//! - `RightmostXForwardedFor` (`axum-client-ip`): the last address appended
//!   to `X-Forwarded-For`, that is, the one added by the proxy in front of
//!   the tracker.
//! - `ConnectInfo` (`axum`): the remote address of the TCP connection. The
//!   server must be started with `into_make_service_with_connect_info`.
//!
//! Which one is used depends on `core.on_reverse_proxy`, see
//! [`peer_ip_resolver`](crate::servers::http::v1::services::peer_ip_resolver).
//!
//! ```text
//! client          <-> proxy                       <-> tracker
//! ip: 126.0.0.1       ip: 126.0.0.2
//!                     X-Forwarded-For: 126.0.0.1
//! ```
//!
//! Here `right_most_x_forwarded_for` is `126.0.0.1` and `connection_info_ip`
//! is `126.0.0.2`. Neither source failing is an error at this point.
use std::net::SocketAddr;

use axum::async_trait;
use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use axum::response::Response;
use axum_client_ip::RightmostXForwardedFor;

use crate::servers::http::v1::services::peer_ip_resolver::ClientIpSources;

pub struct Extract(pub ClientIpSources);

#[async_trait]
impl<S> FromRequestParts<S> for Extract
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let right_most_x_forwarded_for = RightmostXForwardedFor::from_request_parts(parts, state)
            .await
            .ok()
            .map(|header| header.0);

        let connection_info_ip = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|connect_info| connect_info.0.ip());

        Ok(Extract(ClientIpSources {
            right_most_x_forwarded_for,
            connection_info_ip,
        }))
    }
}
