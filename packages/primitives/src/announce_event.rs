use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Announce events. Described on  the
/// [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
///
/// Values the protocol does not define are kept as [`AnnounceEvent::Other`].
#[derive(Hash, Clone, Debug, Display, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum AnnounceEvent {
    /// The peer has started downloading the torrent.
    #[display("started")]
    Started,
    /// The peer has ceased downloading the torrent.
    #[display("stopped")]
    Stopped,
    /// The peer has completed downloading the torrent.
    #[display("completed")]
    Completed,
    /// This is one of the announcements done at regular intervals.
    #[default]
    #[display("")]
    None,
    /// Anything else a client sent.
    #[display("{_0}")]
    Other(String),
}

impl AnnounceEvent {
    /// Maps the `event` query param. A missing or empty param is
    /// [`AnnounceEvent::None`].
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            None | Some("") => Self::None,
            Some("started") => Self::Started,
            Some("stopped") => Self::Stopped,
            Some("completed") => Self::Completed,
            Some(other) => Self::Other(other.to_owned()),
        }
    }
}
