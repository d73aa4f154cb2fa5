//! `Error` response for the [`HTTP tracker`](crate::servers::http).
//!
//! From the [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html):
//!
//! _"Tracker responses are bencoded dictionaries. If a tracker response has a
//! key failure reason, then that maps to a human readable string which explains
//! why the query failed, and no other keys are required."_
//!
//! Error | Status
//! ---|---
//! Malformed request | `400 Bad Request`
//! Swarm store unavailable | `500 Internal Server Error`
//! Response encoding failure | `500 Internal Server Error`
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bencode::{ben_bytes, ben_map};

use crate::core;

/// `Error` response for the [`HTTP tracker`](crate::servers::http).
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Error {
    pub status: StatusCode,
    /// Human readable string which explains why the request failed.
    pub failure_reason: String,
}

impl Error {
    /// The request is missing a param or a param can not be parsed.
    #[must_use]
    pub fn malformed_request(failure_reason: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            failure_reason: failure_reason.to_owned(),
        }
    }

    /// The tracker could not handle a valid request.
    #[must_use]
    pub fn internal(failure_reason: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            failure_reason: failure_reason.to_owned(),
        }
    }

    /// Returns the bencoded representation of the `Error` struct.
    ///
    /// ```rust
    /// use torrust_swarm_tracker::servers::http::v1::responses::error::Error;
    ///
    /// let err = Error::malformed_request("error message");
    ///
    /// // cspell:disable-next-line
    /// assert_eq!(err.write(), b"d14:failure reason13:error messagee");
    /// ```
    #[must_use]
    pub fn write(&self) -> Vec<u8> {
        ben_map! {
            "failure reason" => ben_bytes!(self.failure_reason.as_str())
        }
        .encode()
    }
}

impl From<core::error::Error> for Error {
    fn from(err: core::error::Error) -> Self {
        match err {
            core::error::Error::StoreUnavailable { .. } => Error::internal(&format!("Tracker swarm store unavailable: {err}")),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.status, self.write()).into_response()
    }
}
