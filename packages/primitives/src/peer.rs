//! Peer struct used by the core `Tracker`.
//!
//! A sample peer:
//!
//! ```rust
//! use torrust_swarm_tracker_primitives::peer;
//! use torrust_swarm_tracker_primitives::DurationSinceUnixEpoch;
//!
//! let peer = peer::Peer {
//!     peer_id: peer::Id::try_from(b"-qB00000000000000000".to_vec()).unwrap(),
//!     ip: "126.0.0.1".to_string(),
//!     port: 8080,
//!     updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//!     uploaded: 0,
//!     downloaded: 0,
//!     left: 0,
//! };
//!
//! assert!(peer.is_seeder());
//! ```
use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

use crate::DurationSinceUnixEpoch;

/// A peer taking part in one swarm.
///
/// Peers are unique by `peer_id` within a swarm.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Peer {
    /// ID chosen by the client software
    pub peer_id: Id,
    /// Textual address the peer announced, or the one the tracker observed
    pub ip: String,
    /// Port the peer is listening on
    pub port: u16,
    /// The last time the tracker received an announce request from this peer
    #[serde(serialize_with = "ser_unix_time_value")]
    pub updated: DurationSinceUnixEpoch,
    /// The total amount of bytes uploaded by this peer so far
    pub uploaded: i64,
    /// The total amount of bytes downloaded by this peer so far
    pub downloaded: i64,
    /// The number of bytes this peer still has to download
    pub left: i64,
}

/// Serializes a `DurationSinceUnixEpoch` as a Unix timestamp in seconds.
///
/// # Errors
///
/// Will return `serde::Serializer::Error` if unable to serialize the `unix_time_value`.
pub fn ser_unix_time_value<S: serde::Serializer>(unix_time_value: &DurationSinceUnixEpoch, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_u64(unix_time_value.as_secs())
}

impl Peer {
    #[must_use]
    pub fn is_seeder(&self) -> bool {
        self.left == 0
    }
}

/// Error returned when trying to convert an invalid peer id from raw bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdConversionError {
    #[error("empty peer id {location}")]
    Empty { location: &'static Location<'static> },
    #[error("too many bytes for peer id: {message} {location}")]
    TooManyBytes {
        location: &'static Location<'static>,
        message: String,
    },
}

pub const PEER_ID_MAX_BYTES_LEN: usize = 20;

/// Opaque peer identifier, between 1 and 20 raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id {
    data: Vec<u8>,
}

impl Id {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Converts to hex string.
    ///
    /// For the `Id` `-qB00000000000000000` it returns `0x2d71423030303030303030303030303030303030`
    ///
    /// ```text
    /// Bytes                = Hex
    /// -qB00000000000000000 = 2d 71 42 30 30 30 30 30 30 30 30 30 30 30 30 30 30 30 30 30
    /// ```
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let mut tmp: Vec<u8> = vec![0; self.data.len() * 2];

        match binascii::bin2hex(&self.data, &mut tmp) {
            Ok(hex) => format!("0x{}", String::from_utf8_lossy(hex)),
            Err(_) => String::new(),
        }
    }
}

impl TryFrom<Vec<u8>> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.is_empty() {
            return Err(IdConversionError::Empty {
                location: Location::caller(),
            });
        }
        if bytes.len() > PEER_ID_MAX_BYTES_LEN {
            return Err(IdConversionError::TooManyBytes {
                location: Location::caller(),
                message: format! {"got {} bytes, expected at most {}", bytes.len(), PEER_ID_MAX_BYTES_LEN},
            });
        }

        Ok(Self { data: bytes })
    }
}

impl TryFrom<&[u8]> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from(bytes.to_vec())
    }
}

impl From<[u8; PEER_ID_MAX_BYTES_LEN]> for Id {
    fn from(bytes: [u8; PEER_ID_MAX_BYTES_LEN]) -> Self {
        Self { data: bytes.to_vec() }
    }
}

impl From<i32> for Id {
    fn from(number: i32) -> Self {
        let mut bytes = [0u8; PEER_ID_MAX_BYTES_LEN];
        bytes[16..].copy_from_slice(&number.to_le_bytes());

        Id::from(bytes)
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl Serialize for Id {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex_string())
    }
}

pub mod fixture {
    use super::{Id, Peer};
    use crate::DurationSinceUnixEpoch;

    #[derive(PartialEq, Debug, Default)]
    pub struct PeerBuilder {
        peer: Peer,
    }

    impl PeerBuilder {
        #[must_use]
        pub fn seeder() -> Self {
            let peer = Peer {
                peer_id: Id::from(*b"-qB00000000000000001"),
                ip: "127.0.0.1".to_string(),
                port: 8080,
                updated: DurationSinceUnixEpoch::new(1_669_397_478, 0),
                uploaded: 0,
                downloaded: 0,
                left: 0,
            };

            Self { peer }
        }

        #[must_use]
        pub fn leecher() -> Self {
            let peer = Peer {
                peer_id: Id::from(*b"-qB00000000000000002"),
                ip: "127.0.0.2".to_string(),
                port: 8080,
                updated: DurationSinceUnixEpoch::new(1_669_397_478, 0),
                uploaded: 0,
                downloaded: 0,
                left: 10,
            };

            Self { peer }
        }

        #[must_use]
        pub fn with_peer_id(mut self, peer_id: &Id) -> Self {
            self.peer.peer_id = peer_id.clone();
            self
        }

        #[must_use]
        pub fn with_ip(mut self, ip: &str) -> Self {
            self.peer.ip = ip.to_string();
            self
        }

        #[must_use]
        pub fn with_port(mut self, port: u16) -> Self {
            self.peer.port = port;
            self
        }

        #[must_use]
        pub fn with_bytes_pending_to_download(mut self, left: i64) -> Self {
            self.peer.left = left;
            self
        }

        #[must_use]
        pub fn with_no_bytes_pending_to_download(mut self) -> Self {
            self.peer.left = 0;
            self
        }

        #[must_use]
        pub fn last_updated_on(mut self, updated: DurationSinceUnixEpoch) -> Self {
            self.peer.updated = updated;
            self
        }

        #[must_use]
        pub fn build(self) -> Peer {
            self.peer
        }
    }

    impl Default for Peer {
        fn default() -> Self {
            Self {
                peer_id: Id::default(),
                ip: "127.0.0.1".to_string(),
                port: 8080,
                updated: DurationSinceUnixEpoch::new(1_669_397_478, 0),
                uploaded: 0,
                downloaded: 0,
                left: 0,
            }
        }
    }

    impl Default for Id {
        fn default() -> Self {
            Id::from(*b"-qB00000000000000000")
        }
    }
}
