//! The value stored for each peer in a swarm hash.
//!
//! ```text
//! <ip>:<port>:<last seen, unix seconds>
//! ```
//!
//! For example `192.168.1.1:6881:1669397478`. The record is split from the
//! right, so IPv6 addresses (`::1:6881:1669397478`) are kept whole.
use std::fmt;
use std::panic::Location;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use torrust_swarm_tracker_primitives::peer::Peer;
use torrust_swarm_tracker_primitives::DurationSinceUnixEpoch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub ip: String,
    pub port: u16,
    pub last_seen: DurationSinceUnixEpoch,
}

impl Record {
    /// Seconds precision, as stored.
    #[must_use]
    pub fn last_seen_secs(&self) -> u64 {
        self.last_seen.as_secs()
    }
}

impl From<&Peer> for Record {
    fn from(peer: &Peer) -> Self {
        Self {
            ip: peer.ip.clone(),
            port: peer.port,
            last_seen: Duration::from_secs(peer.updated.as_secs()),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.ip, self.port, self.last_seen_secs())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRecordError {
    #[error("swarm record `{record}` does not have three parts, {location}")]
    WrongNumberOfParts {
        location: &'static Location<'static>,
        record: String,
    },
    #[error("swarm record `{record}` has an empty ip, {location}")]
    EmptyIp {
        location: &'static Location<'static>,
        record: String,
    },
    #[error("swarm record `{record}` has an invalid port, {location}")]
    InvalidPort {
        location: &'static Location<'static>,
        record: String,
    },
    #[error("swarm record `{record}` has an invalid timestamp, {location}")]
    InvalidTimestamp {
        location: &'static Location<'static>,
        record: String,
    },
}

impl FromStr for Record {
    type Err = ParseRecordError;

    #[track_caller]
    fn from_str(record: &str) -> Result<Self, Self::Err> {
        let mut parts = record.rsplitn(3, ':');

        let (Some(secs), Some(port), Some(ip)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseRecordError::WrongNumberOfParts {
                location: Location::caller(),
                record: record.to_owned(),
            });
        };

        if ip.is_empty() {
            return Err(ParseRecordError::EmptyIp {
                location: Location::caller(),
                record: record.to_owned(),
            });
        }

        let Ok(port) = port.parse::<u16>() else {
            return Err(ParseRecordError::InvalidPort {
                location: Location::caller(),
                record: record.to_owned(),
            });
        };

        let Ok(secs) = secs.parse::<u64>() else {
            return Err(ParseRecordError::InvalidTimestamp {
                location: Location::caller(),
                record: record.to_owned(),
            });
        };

        Ok(Self {
            ip: ip.to_owned(),
            port,
            last_seen: Duration::from_secs(secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ParseRecordError, Record};

    #[test]
    fn it_should_be_written_as_ip_port_and_last_seen_seconds() {
        let record = Record {
            ip: "192.168.1.1".to_string(),
            port: 6881,
            last_seen: Duration::new(1_669_397_478, 999_999_999),
        };

        assert_eq!(record.to_string(), "192.168.1.1:6881:1669397478");
    }

    #[test]
    fn it_should_be_parsed_back() {
        let record: Record = "192.168.1.1:6881:1669397478".parse().unwrap();

        assert_eq!(
            record,
            Record {
                ip: "192.168.1.1".to_string(),
                port: 6881,
                last_seen: Duration::from_secs(1_669_397_478),
            }
        );
    }

    #[test]
    fn it_should_keep_ipv6_addresses_whole() {
        let record: Record = "2001:db8::1:6881:1669397478".parse().unwrap();

        assert_eq!(record.ip, "2001:db8::1");
        assert_eq!(record.port, 6881);
    }

    #[test]
    fn it_should_reject_records_without_three_parts() {
        let err = "192.168.1.1:6881".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseRecordError::WrongNumberOfParts { .. }));
    }

    #[test]
    fn it_should_reject_records_with_an_empty_ip() {
        let err = ":6881:1669397478".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseRecordError::EmptyIp { .. }));
    }

    #[test]
    fn it_should_reject_records_with_an_invalid_port() {
        let err = "192.168.1.1:70000:1669397478".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseRecordError::InvalidPort { .. }));
    }

    #[test]
    fn it_should_reject_records_with_an_invalid_timestamp() {
        let err = "192.168.1.1:6881:yesterday".parse::<Record>().unwrap_err();

        assert!(matches!(err, ParseRecordError::InvalidTimestamp { .. }));
    }
}
