//! `announce` query builder.
//!
//! The query is built by hand because `reqwest` does not allow byte arrays in
//! query parameters: `info_hash` and `peer_id` are percent encoded raw bytes.
use std::fmt;

use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
use torrust_swarm_tracker_primitives::info_hash::InfoHash;
use torrust_swarm_tracker_primitives::peer;

/// URL query component, with params in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn set(&mut self, name: &str, value: &str) {
        match self.params.iter_mut().find(|(param, _)| param == name) {
            Some(param) => param.1 = value.to_string(),
            None => self.params.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.params.retain(|(param, _)| param != name);
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<String>>()
            .join("&");

        write!(f, "{query}")
    }
}

pub fn percent_encode_bytes(bytes: &[u8]) -> String {
    percent_encode(bytes, NON_ALPHANUMERIC).to_string()
}

#[derive(Debug)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    /// A `started` announce of a leecher with all the required params.
    pub fn new(info_hash: &InfoHash, peer_id: &peer::Id, port: u16) -> QueryBuilder {
        let mut query = Query::default();

        query.set("info_hash", &percent_encode_bytes(&info_hash.bytes()));
        query.set("peer_id", &percent_encode_bytes(peer_id.as_bytes()));
        query.set("port", &port.to_string());
        query.set("uploaded", "0");
        query.set("downloaded", "0");
        query.set("left", "1024");
        query.set("event", "started");

        Self { query }
    }

    pub fn with_event(self, event: &str) -> Self {
        self.with_param("event", event)
    }

    pub fn with_left(self, left: i64) -> Self {
        self.with_param("left", &left.to_string())
    }

    pub fn with_compact(self) -> Self {
        self.with_param("compact", "1")
    }

    pub fn without_compact(self) -> Self {
        self.with_param("compact", "0")
    }

    pub fn with_no_peer_id(self) -> Self {
        self.with_param("no_peer_id", "1")
    }

    pub fn with_numwant(self, numwant: u32) -> Self {
        self.with_param("numwant", &numwant.to_string())
    }

    pub fn with_ip(self, ip: &str) -> Self {
        self.with_param("ip", ip)
    }

    /// Sets any param, with its value already encoded.
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.query.set(name, value);
        self
    }

    pub fn without_param(mut self, name: &str) -> Self {
        self.query.remove(name);
        self
    }

    pub fn query(self) -> Query {
        self.query
    }
}
