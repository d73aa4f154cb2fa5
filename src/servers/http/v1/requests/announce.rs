//! `Announce` request for the HTTP tracker.
//!
//! Data structures and logic for parsing the `announce` request.
use std::panic::Location;

use thiserror::Error;
use torrust_swarm_tracker_primitives::announce_event::AnnounceEvent;
use torrust_swarm_tracker_primitives::info_hash::{self, InfoHash};
use torrust_swarm_tracker_primitives::peer;
use tracing::debug;

use crate::servers::http::percent_encoding::{percent_decode_info_hash, percent_decode_peer_id};
use crate::servers::http::v1::query::{ParseQueryError, Query};
use crate::servers::http::v1::responses;

/// The number of bytes `downloaded`, `uploaded` or `left`. It's used in the
/// `Announce` request for parameters that represent a number of bytes.
pub type NumberOfBytes = i64;

// Query param names
const INFO_HASH: &str = "info_hash";
const PEER_ID: &str = "peer_id";
const PORT: &str = "port";
const UPLOADED: &str = "uploaded";
const DOWNLOADED: &str = "downloaded";
const LEFT: &str = "left";
const EVENT: &str = "event";
const IP: &str = "ip";
const NUMWANT: &str = "numwant";
const KEY: &str = "key";
const COMPACT: &str = "compact";
const NO_PEER_ID: &str = "no_peer_id";
const TRACKER_ID: &str = "trackerid";
const CORRUPT: &str = "corrupt";
const SUPPORT_CRYPTO: &str = "supportcrypto";
const REDUNDANT: &str = "redundant";

/// The `Announce` request. Fields use the domain types after parsing the
/// query params of the request.
///
/// ```rust
/// use torrust_swarm_tracker::servers::http::v1::requests::announce::{Announce, Compact};
/// use torrust_swarm_tracker_primitives::announce_event::AnnounceEvent;
/// use torrust_swarm_tracker_primitives::info_hash::InfoHash;
/// use torrust_swarm_tracker_primitives::peer;
///
/// let request = Announce {
///     // Mandatory params
///     info_hash: "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse::<InfoHash>().unwrap(),
///     peer_id: peer::Id::from(*b"-qB00000000000000001"),
///     port: 17548,
///     uploaded: 0,
///     downloaded: 0,
///     left: 1024,
///     // Optional params
///     event: AnnounceEvent::Started,
///     ip: None,
///     numwant: Some(30),
///     key: None,
///     compact: Compact::Accepted,
///     no_peer_id: false,
///     tracker_id: None,
///     corrupt: None,
///     support_crypto: None,
///     redundant: None,
/// };
/// ```
///
/// `key`, `trackerid`, `corrupt`, `supportcrypto` and `redundant` are parsed
/// but the tracker does not act on them.
#[derive(Debug, PartialEq, Clone)]
pub struct Announce {
    /// The `InfoHash` of the torrent.
    pub info_hash: InfoHash,
    /// The peer id chosen by the client, 1 to 20 bytes.
    pub peer_id: peer::Id,
    /// The port the client is listening on.
    pub port: u16,
    /// Bytes uploaded since the client sent the `started` event.
    pub uploaded: NumberOfBytes,
    /// Bytes downloaded since the client sent the `started` event.
    pub downloaded: NumberOfBytes,
    /// Bytes the client still has to download.
    pub left: NumberOfBytes,
    /// [`AnnounceEvent::None`] when the param is missing or empty.
    pub event: AnnounceEvent,
    /// The address the client wants to be reached at. When it is missing the
    /// tracker uses the address the request came from.
    pub ip: Option<String>,
    /// Number of peers the client wants. The tracker default when missing.
    pub numwant: Option<u32>,
    /// Opaque value the client uses to identify itself across IP changes.
    pub key: Option<String>,
    /// How the client wants the peer list. Compact when missing.
    pub compact: Compact,
    /// `no_peer_id=1`: omit the peer ids from a non-compact peer list.
    pub no_peer_id: bool,
    /// The `tracker id` a previous response carried.
    pub tracker_id: Option<String>,
    pub corrupt: Option<NumberOfBytes>,
    pub support_crypto: Option<i64>,
    pub redundant: Option<NumberOfBytes>,
}

/// Errors that can occur when parsing the `Announce` request.
///
/// The `info_hash` and `peer_id` query params are special because they contain
/// binary data. The `info_hash` is a 20-byte SHA1 hash and the `peer_id` is a
/// byte string of up to 20 bytes.
#[derive(Error, Debug)]
pub enum ParseAnnounceQueryError {
    /// A mandatory param is missing.
    #[error("missing param {param_name} in {location}")]
    MissingParam {
        location: &'static Location<'static>,
        param_name: String,
    },
    /// The param cannot be parsed into the domain type.
    #[error("invalid param value {param_value} for {param_name} in {location}")]
    InvalidParam {
        param_name: String,
        param_value: String,
        location: &'static Location<'static>,
    },
    /// The param value is out of range.
    #[error("param value overflow {param_value} for {param_name} in {location}")]
    NumberOfBytesOverflow {
        param_name: String,
        param_value: String,
        location: &'static Location<'static>,
    },
    /// The `info_hash` is invalid.
    #[error("invalid param value {param_value} for {param_name} in {source}")]
    InvalidInfoHashParam {
        param_name: String,
        param_value: String,
        source: info_hash::ConversionError,
    },
    /// The `peer_id` is invalid.
    #[error("invalid param value {param_value} for {param_name} in {source}")]
    InvalidPeerIdParam {
        param_name: String,
        param_value: String,
        source: peer::IdConversionError,
    },
}

/// How the peer list is returned.
///
/// Only `compact=1` asks for the compact format. Any other value asks for
/// the list of dictionaries. A missing `compact` param counts as `1`.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum Compact {
    /// `compact=1`: the peer list is a single byte string.
    #[default]
    Accepted,
    /// Any other value: the peer list is a list of dictionaries.
    NotAccepted,
}

impl Compact {
    fn from_flag(flag: i64) -> Self {
        if flag == 1 {
            Self::Accepted
        } else {
            Self::NotAccepted
        }
    }
}

impl From<ParseQueryError> for responses::error::Error {
    fn from(err: ParseQueryError) -> Self {
        responses::error::Error::malformed_request(&format!("Cannot parse query params: {err}"))
    }
}

impl From<ParseAnnounceQueryError> for responses::error::Error {
    fn from(err: ParseAnnounceQueryError) -> Self {
        responses::error::Error::malformed_request(&format!("Cannot parse query params for announce request: {err}"))
    }
}

impl TryFrom<Query> for Announce {
    type Error = ParseAnnounceQueryError;

    fn try_from(query: Query) -> Result<Self, Self::Error> {
        Ok(Self {
            info_hash: extract_info_hash(&query)?,
            peer_id: extract_peer_id(&query)?,
            port: extract_port(&query)?,
            uploaded: extract_number_of_bytes(UPLOADED, &query)?,
            downloaded: extract_number_of_bytes(DOWNLOADED, &query)?,
            left: extract_number_of_bytes(LEFT, &query)?,
            event: AnnounceEvent::from_param(query.get_param(EVENT)),
            ip: extract_text(IP, &query),
            numwant: extract_optional_number::<u32>(NUMWANT, &query),
            key: extract_text(KEY, &query),
            compact: extract_compact(&query),
            no_peer_id: extract_optional_number::<i64>(NO_PEER_ID, &query) == Some(1),
            tracker_id: extract_text(TRACKER_ID, &query),
            corrupt: extract_optional_number_of_bytes(CORRUPT, &query),
            support_crypto: extract_optional_number::<i64>(SUPPORT_CRYPTO, &query),
            redundant: extract_optional_number_of_bytes(REDUNDANT, &query),
        })
    }
}

// Mandatory params

#[track_caller]
fn required_param<'a>(param_name: &str, query: &'a Query) -> Result<&'a str, ParseAnnounceQueryError> {
    let location = Location::caller();

    query.get_param(param_name).ok_or_else(|| ParseAnnounceQueryError::MissingParam {
        location,
        param_name: param_name.to_owned(),
    })
}

#[track_caller]
fn extract_info_hash(query: &Query) -> Result<InfoHash, ParseAnnounceQueryError> {
    let raw_param = required_param(INFO_HASH, query)?;

    percent_decode_info_hash(raw_param).map_err(|err| ParseAnnounceQueryError::InvalidInfoHashParam {
        param_name: INFO_HASH.to_owned(),
        param_value: raw_param.to_owned(),
        source: err,
    })
}

#[track_caller]
fn extract_peer_id(query: &Query) -> Result<peer::Id, ParseAnnounceQueryError> {
    let raw_param = required_param(PEER_ID, query)?;

    percent_decode_peer_id(raw_param).map_err(|err| ParseAnnounceQueryError::InvalidPeerIdParam {
        param_name: PEER_ID.to_owned(),
        param_value: raw_param.to_owned(),
        source: err,
    })
}

#[track_caller]
fn extract_port(query: &Query) -> Result<u16, ParseAnnounceQueryError> {
    let raw_param = required_param(PORT, query)?;

    parse_number::<u16>(PORT, raw_param)
}

#[track_caller]
fn extract_number_of_bytes(param_name: &str, query: &Query) -> Result<NumberOfBytes, ParseAnnounceQueryError> {
    let raw_param = required_param(param_name, query)?;

    parse_number_of_bytes(param_name, raw_param)
}

// Optional params
//
// A value that does not parse is ignored, as if the client had not sent it.

fn extract_optional_number<T: std::str::FromStr>(param_name: &str, query: &Query) -> Option<T> {
    match query.get_param(param_name) {
        None | Some("") => None,
        Some(raw_param) => match raw_param.parse::<T>() {
            Ok(number) => Some(number),
            Err(_) => {
                debug!(target: "HTTP TRACKER", param = %param_name, value = %raw_param, "ignoring invalid optional param");
                None
            }
        },
    }
}

fn extract_optional_number_of_bytes(param_name: &str, query: &Query) -> Option<NumberOfBytes> {
    extract_optional_number::<u64>(param_name, query).and_then(|number| NumberOfBytes::try_from(number).ok())
}

/// A `compact` value that is not an integer asks for the list of
/// dictionaries, like any integer other than `1`.
fn extract_compact(query: &Query) -> Compact {
    match query.get_param(COMPACT) {
        None | Some("") => Compact::default(),
        Some(_) => extract_optional_number::<i64>(COMPACT, query).map_or(Compact::NotAccepted, Compact::from_flag),
    }
}

/// Free text params are percent decoded. An empty value is the same as a
/// missing param.
fn extract_text(param_name: &str, query: &Query) -> Option<String> {
    query
        .get_param(param_name)
        .filter(|raw_param| !raw_param.is_empty())
        .map(|raw_param| percent_encoding::percent_decode_str(raw_param).decode_utf8_lossy().into_owned())
}

#[track_caller]
fn parse_number<T: std::str::FromStr>(param_name: &str, raw_param: &str) -> Result<T, ParseAnnounceQueryError> {
    let location = Location::caller();

    raw_param.parse::<T>().map_err(|_e| ParseAnnounceQueryError::InvalidParam {
        param_name: param_name.to_owned(),
        param_value: raw_param.to_owned(),
        location,
    })
}

/// Byte counters are non-negative and must fit in an `i64`.
#[track_caller]
fn parse_number_of_bytes(param_name: &str, raw_param: &str) -> Result<NumberOfBytes, ParseAnnounceQueryError> {
    let location = Location::caller();

    let number = parse_number::<u64>(param_name, raw_param)?;

    NumberOfBytes::try_from(number).map_err(|_e| ParseAnnounceQueryError::NumberOfBytesOverflow {
        param_name: param_name.to_owned(),
        param_value: raw_param.to_owned(),
        location,
    })
}
