use std::net::Ipv4Addr;

use reqwest::Response;
use torrust_swarm_tracker::servers::http::v1::responses::{Announce, CompactPeer, Peers};

/// Decodes a bencoded announce response, checking the status first.
pub async fn announce_response(response: Response) -> Announce {
    assert_eq!(response.status(), 200);

    let body = response.bytes().await.unwrap();

    bencode::unmarshal::<Announce>(&body)
        .unwrap_or_else(|_| panic!("response body should be a valid announce response, got \"{:?}\"", &body))
}

pub fn compact_peers(announce: &Announce) -> Vec<CompactPeer> {
    match &announce.peers {
        Peers::Compact(peers) => peers.clone(),
        Peers::Normal(_) => panic!("expected a compact peer list, got {:?}", announce.peers),
    }
}

pub fn contains_compact_peer(announce: &Announce, ip: Ipv4Addr, port: u16) -> bool {
    compact_peers(announce).contains(&CompactPeer { ip, port })
}

pub async fn assert_bencoded_error(response: Response, status: u16, expected_failure_reason: &str) {
    assert_eq!(response.status(), status);

    let body = response.bytes().await.unwrap();

    let value = bencode::decode(&body).unwrap_or_else(|_| panic!("response body should be bencoded, got \"{body:?}\""));

    let failure_reason = value
        .dict()
        .and_then(|dict| dict.lookup(b"failure reason"))
        .and_then(bencode::BencodeValue::str)
        .unwrap_or_else(|| panic!("response should have a failure reason, got \"{body:?}\""))
        .to_string();

    assert!(
        failure_reason.contains(expected_failure_reason),
        r#"response: `"{failure_reason}"` does not contain: `"{expected_failure_reason}"`"#
    );
}
