//! `Announce` response for the HTTP tracker [`announce`](crate::servers::http::v1::requests::announce::Announce) request.
//!
//! Data structures and logic to build the `announce` response.
//!
//! The response is a bencoded dictionary with its keys in this order:
//!
//! Key | Presence
//! ---|---
//! `warning message` | Never sent by this tracker, read when present
//! `interval` | Always
//! `min interval` | When `core.announce_policy.interval_min` is set
//! `tracker id` | When `core.announce_policy.tracker_id` is set
//! `complete` | Always
//! `incomplete` | Always
//! `peers` | Always, [`Peers::Compact`] or [`Peers::Normal`]
//!
//! _"To reduce the size of tracker responses and to reduce memory and
//! computational requirements in trackers, trackers may return peers as a
//! packed string rather than as a bencoded list."_
//!
//! Refer to the official BEPs for more information:
//!
//! - [BEP 03: The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
//! - [BEP 23: Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html)
use std::net::{IpAddr, Ipv4Addr};

use axum::http::StatusCode;
use bencode::{
    ben_bytes, ben_int, ben_map, BencodeConvertError, BencodeConvertErrorKind, BencodeConvertResult, BencodeValue, Field,
    Fields, Kind, Schema,
};
use torrust_swarm_tracker_primitives::peer::Peer;

use super::Response;
use crate::core::AnnounceData;
use crate::servers::http::v1::requests::announce::Compact as CompactRequested;
use crate::servers::http::v1::responses;

const COMPACT_PEER_LEN: usize = 6;

/// The `announce` response.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Announce {
    pub warning_message: Option<String>,
    pub interval: i64,
    pub min_interval: Option<i64>,
    pub tracker_id: Option<String>,
    pub complete: i64,
    pub incomplete: i64,
    pub peers: Peers,
}

impl Announce {
    /// Builds the response in the format the client asked for.
    ///
    /// With `no_peer_id` the non-compact peer dictionaries carry an empty
    /// `peer id`.
    #[must_use]
    pub fn from_data(data: AnnounceData, compact: CompactRequested, no_peer_id: bool) -> Self {
        let peers = match compact {
            CompactRequested::Accepted => Peers::Compact(data.peers.iter().filter_map(CompactPeer::from_peer).collect()),
            CompactRequested::NotAccepted => Peers::Normal(
                data.peers
                    .iter()
                    .map(|peer| NormalPeer::from_peer(peer, no_peer_id))
                    .collect(),
            ),
        };

        Self {
            warning_message: None,
            interval: i64::from(data.policy.interval),
            min_interval: data.policy.interval_min.map(i64::from),
            tracker_id: data.policy.tracker_id,
            complete: i64::from(data.stats.complete),
            incomplete: i64::from(data.stats.incomplete),
            peers,
        }
    }
}

impl Schema for Announce {
    const FIELDS: &'static [Field] = &[
        Field::optional("warning_message", "warning message", Kind::Bytes),
        Field::required("interval", "interval", Kind::Int),
        Field::optional("min_interval", "min interval", Kind::Int),
        Field::optional("tracker_id", "tracker id", Kind::Bytes),
        Field::required("complete", "complete", Kind::Int),
        Field::required("incomplete", "incomplete", Kind::Int),
        Field::required("peers", "peers", Kind::Any),
    ];

    fn get(&self, name: &str) -> Option<BencodeValue> {
        match name {
            "warning_message" => self.warning_message.as_deref().map(|message| ben_bytes!(message)),
            "interval" => Some(ben_int!(self.interval)),
            "min_interval" => self.min_interval.map(|min_interval| ben_int!(min_interval)),
            "tracker_id" => self.tracker_id.as_deref().map(|tracker_id| ben_bytes!(tracker_id)),
            "complete" => Some(ben_int!(self.complete)),
            "incomplete" => Some(ben_int!(self.incomplete)),
            "peers" => Some(self.peers.to_value()),
            _ => None,
        }
    }

    fn build(fields: &Fields) -> BencodeConvertResult<Self> {
        let peers = fields.value("peers").map(Peers::from_value).transpose()?.unwrap_or_default();

        Ok(Self {
            warning_message: fields.opt_string("warning_message"),
            interval: fields.int("interval")?,
            min_interval: fields.opt_int("min_interval"),
            tracker_id: fields.opt_string("tracker_id"),
            complete: fields.int("complete")?,
            incomplete: fields.int("incomplete")?,
            peers,
        })
    }
}

impl Response for Announce {
    fn body(self) -> Result<Vec<u8>, responses::error::Error> {
        bencode::marshal(&self)
            .map_err(|err| responses::error::Error::internal(&format!("Cannot encode announce response: {err}")))
    }
}

impl axum::response::IntoResponse for Announce {
    fn into_response(self) -> axum::response::Response {
        match self.body() {
            Ok(bytes) => (StatusCode::OK, bytes).into_response(),
            Err(err) => err.into_response(),
        }
    }
}

/// The peer list, in one of its two formats.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Peers {
    /// One byte string with 6 bytes per peer.
    Compact(Vec<CompactPeer>),
    /// A list with one dictionary per peer.
    Normal(Vec<NormalPeer>),
}

impl Default for Peers {
    fn default() -> Self {
        Peers::Compact(Vec::new())
    }
}

impl Peers {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Peers::Compact(peers) => peers.len(),
            Peers::Normal(peers) => peers.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn to_value(&self) -> BencodeValue {
        match self {
            Peers::Compact(peers) => BencodeValue::Bytes(peers.iter().flat_map(CompactPeer::to_bytes).collect()),
            Peers::Normal(peers) => BencodeValue::List(peers.iter().map(NormalPeer::to_value).collect()),
        }
    }

    fn from_value(value: &BencodeValue) -> BencodeConvertResult<Self> {
        if let Some(bytes) = value.bytes() {
            if bytes.len() % COMPACT_PEER_LEN != 0 {
                return Err(wrong_type("peers", "6 bytes per peer"));
            }

            return Ok(Peers::Compact(bytes.chunks_exact(COMPACT_PEER_LEN).map(CompactPeer::from_bytes).collect()));
        }

        if let Some(list) = value.list() {
            return list.iter().map(NormalPeer::from_value).collect::<Result<Vec<_>, _>>().map(Peers::Normal);
        }

        Err(wrong_type("peers", "bytes or list"))
    }
}

fn wrong_type(key: &str, expected_type: &str) -> BencodeConvertError {
    BencodeConvertError::from_kind(BencodeConvertErrorKind::WrongType {
        key: key.as_bytes().to_vec(),
        expected_type: expected_type.to_owned(),
    })
}

/// A peer in the non-compact format.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NormalPeer {
    /// Empty when the client sent `no_peer_id=1`.
    pub peer_id: Vec<u8>,
    pub ip: String,
    pub port: u16,
}

impl NormalPeer {
    #[must_use]
    pub fn from_peer(peer: &Peer, no_peer_id: bool) -> Self {
        Self {
            peer_id: if no_peer_id {
                Vec::new()
            } else {
                peer.peer_id.as_bytes().to_vec()
            },
            ip: peer.ip.clone(),
            port: peer.port,
        }
    }

    fn to_value(&self) -> BencodeValue {
        ben_map! {
            "peer id" => ben_bytes!(self.peer_id.as_slice()),
            "ip" => ben_bytes!(self.ip.as_str()),
            "port" => ben_int!(i64::from(self.port))
        }
    }

    fn from_value(value: &BencodeValue) -> BencodeConvertResult<Self> {
        let dict = value.dict().ok_or_else(|| wrong_type("peers", Kind::Dict.name()))?;

        let peer_id = dict.lookup(b"peer id").and_then(BencodeValue::bytes).unwrap_or_default();
        let ip = dict
            .lookup(b"ip")
            .and_then(BencodeValue::str)
            .ok_or_else(|| wrong_type("ip", "utf-8 string"))?;
        let port = dict
            .lookup(b"port")
            .and_then(BencodeValue::int)
            .and_then(|port| u16::try_from(port).ok())
            .ok_or_else(|| wrong_type("port", "port number"))?;

        Ok(Self {
            peer_id: peer_id.to_vec(),
            ip: ip.to_owned(),
            port,
        })
    }
}

/// A peer in the compact format: an IPv4 address and a port, both in network
/// byte order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CompactPeer {
    pub ip: Ipv4Addr,
    pub port: u16,
}

impl CompactPeer {
    /// `None` when the peer IP is not an IPv4 address (IPv4-mapped IPv6
    /// addresses count as IPv4). Those peers are left out of compact lists.
    #[must_use]
    pub fn from_peer(peer: &Peer) -> Option<Self> {
        let ip = match peer.ip.parse::<IpAddr>().ok()? {
            IpAddr::V4(ip) => ip,
            IpAddr::V6(ip) => ip.to_ipv4_mapped()?,
        };

        Some(Self { ip, port: peer.port })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; COMPACT_PEER_LEN] {
        let mut bytes = [0u8; COMPACT_PEER_LEN];
        bytes[..4].copy_from_slice(&self.ip.octets());
        bytes[4..].copy_from_slice(&self.port.to_be_bytes());
        bytes
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            ip: Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]),
            port: u16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }
}
