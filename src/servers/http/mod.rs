//! HTTP Tracker.
//!
//! This module contains the HTTP tracker implementation.
//!
//! The HTTP tracker is a small HTTP server that answers `GET` requests:
//!
//! - `/announce` (also served on `/tracker`): used to announce the presence
//!   of a peer to the tracker and to get a list of other peers in the swarm.
//! - `/health_check`: a JSON report of the tracker health.
//!
//! ## Table of Contents
//!
//! - [Requests](#requests)
//!     - [Announce](#announce)
//!     - [Health check](#health-check)
//! - [Versioning](#versioning)
//! - [Links](#links)
//!
//! ## Requests
//!
//! ### Announce
//!
//! `Announce` requests are used to announce the presence of a peer to the
//! tracker. The tracker responds with a list of peers that are also sharing
//! the same torrent. A "swarm" is the group of peers sharing one torrent.
//!
//! `Announce` responses are encoded in [bencoded](https://en.wikipedia.org/wiki/Bencode)
//! format.
//!
//! There are two types of `Announce` responses: `compact` and `non-compact`. In
//! a compact response, the peers are encoded in a single byte string, 6 bytes
//! per IPv4 peer. In a non-compact response, the peers are encoded in a list
//! of dictionaries.
//!
//! **Query parameters**
//!
//! Parameter | Type | Required | Default | Example
//! ---|---|---|---|---
//! [`info_hash`](crate::servers::http::v1::requests::announce::Announce::info_hash) | percent encoded 20-byte array | Yes | | `%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0`
//! [`peer_id`](crate::servers::http::v1::requests::announce::Announce::peer_id) | percent encoded, 1 to 20 bytes | Yes | | `-qB00000000000000001`
//! [`port`](crate::servers::http::v1::requests::announce::Announce::port) | `0..=65535` | Yes | | `17548`
//! [`uploaded`](crate::servers::http::v1::requests::announce::Announce::uploaded) | non-negative integer | Yes | | `0`
//! [`downloaded`](crate::servers::http::v1::requests::announce::Announce::downloaded) | non-negative integer | Yes | | `0`
//! [`left`](crate::servers::http::v1::requests::announce::Announce::left) | non-negative integer | Yes | | `0`
//! [`event`](crate::servers::http::v1::requests::announce::Announce::event) | `started`, `stopped`, `completed` or empty | No | empty | `started`
//! [`ip`](crate::servers::http::v1::requests::announce::Announce::ip) | text | No | request address | `2.137.87.41`
//! [`numwant`](crate::servers::http::v1::requests::announce::Announce::numwant) | non-negative integer | No | `core.swarm_policy.default_numwant` | `50`
//! [`compact`](crate::servers::http::v1::requests::announce::Announce::compact) | integer | No | `1` | `0`
//! [`no_peer_id`](crate::servers::http::v1::requests::announce::Announce::no_peer_id) | integer | No | `0` | `1`
//! `key`, `trackerid`, `corrupt`, `supportcrypto`, `redundant` | | No | | |
//!
//! > **NOTICE**: the `info_hash` parameter is NOT a `URL` encoded string param.
//! > It is the percent encoding of the raw `info_hash` bytes. URL `GET` params
//! > can contain any bytes, not only well-formed UTF-8. The same applies to
//! > `peer_id`.
//!
//! What the tracker does depends on the `event`:
//!
//! Event | Swarm | Response
//! ---|---|---
//! `started` or empty | the peer is added or refreshed | announce response
//! `stopped` | the peer is removed | empty `200 OK`
//! `completed` or unknown | unchanged | announce response
//!
//! **Sample announce URL**
//!
//! <http://0.0.0.0:18312/announce?info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0&peer_addr=2.137.87.41&downloaded=0&uploaded=0&peer_id=-qB00000000000000001&port=17548&left=0&event=completed&compact=0>
//!
//! **Sample non-compact response**
//!
//! ```text
//! d8:intervali1800e8:completei1e10:incompletei0e5:peersld7:peer id20:-qB000000000000000012:ip11:2.137.87.414:porti17548eeee
//! ```
//!
//! **Sample compact response**
//!
//! ```text
//! d8:intervali1800e8:completei1e10:incompletei0e5:peers6:<6 bytes>e
//! ```
//!
//! Errors are bencoded dictionaries with a `failure reason`, sent with
//! `400 Bad Request` when the request is malformed and `500 Internal Server
//! Error` when the tracker can not serve it.
//!
//! ```text
//! d14:failure reason23:missing param info_hashe
//! ```
//!
//! Refer to the [`Announce`](crate::servers::http::v1::requests::announce::Announce)
//! request and the [`Announce`](crate::servers::http::v1::responses::announce::Announce)
//! response for more information.
//!
//! ### Health check
//!
//! `GET /health_check` returns `{"status":"Ok"}` while the swarm store answers
//! and `503 Service Unavailable` with `"status":"Error"` otherwise.
//!
//! ## Versioning
//!
//! Only the `v1` routes exist. They live in [`v1`].
//!
//! ## Links
//!
//! - [Bencode](https://en.wikipedia.org/wiki/Bencode).
//! - [BEP 03. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html).
//! - [BEP 23. Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html).
pub mod percent_encoding;
pub mod server;
pub mod v1;
