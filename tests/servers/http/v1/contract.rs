use torrust_swarm_tracker_test_helpers::configuration;

use crate::servers::http::Started;

#[tokio::test]
async fn environment_should_be_started_and_stopped() {
    let env = Started::new(&configuration::ephemeral()).await;

    env.stop().await;
}

mod for_all_config_modes {

    mod and_running_on_reverse_proxy {
        use torrust_swarm_tracker_primitives::info_hash::InfoHash;
        use torrust_swarm_tracker_primitives::peer;
        use torrust_swarm_tracker_test_helpers::configuration;

        use crate::servers::http::asserts::{announce_response, assert_bencoded_error, contains_compact_peer};
        use crate::servers::http::client::Client;
        use crate::servers::http::requests::QueryBuilder;
        use crate::servers::http::Started;

        #[tokio::test]
        async fn should_fail_when_the_http_request_does_not_include_the_xff_http_request_header() {
            // If the tracker is running behind a reverse proxy, the peer IP is the
            // right most IP in the `X-Forwarded-For` HTTP header, which is the IP of the proxy's client.

            let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

            let query = QueryBuilder::new(&InfoHash([0x69; 20]), &peer::Id::from(1), 17548).query();

            let response = Client::new(*env.bind_address()).get(&format!("announce?{query}")).await;

            assert_bencoded_error(response, 400, "X-Forwarded-For").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_xff_http_request_header_contains_an_invalid_ip() {
            let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

            let query = QueryBuilder::new(&InfoHash([0x69; 20]), &peer::Id::from(1), 17548).query();

            let response = Client::new(*env.bind_address())
                .announce_with_header(&query, "X-Forwarded-For", "INVALID IP")
                .await;

            assert_bencoded_error(response, 400, "X-Forwarded-For").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_store_the_right_most_ip_of_the_xff_http_request_header() {
            let env = Started::new(&configuration::ephemeral_with_reverse_proxy()).await;

            let query = QueryBuilder::new(&InfoHash([0x69; 20]), &peer::Id::from(1), 17548).query();

            let response = Client::new(*env.bind_address())
                .announce_with_header(&query, "X-Forwarded-For", "203.0.113.195, 150.172.238.178")
                .await;

            let announce = announce_response(response).await;

            assert!(contains_compact_peer(&announce, "150.172.238.178".parse().unwrap(), 17548));

            env.stop().await;
        }
    }

    mod receiving_a_health_check_request {
        use torrust_swarm_tracker_test_helpers::configuration;

        use crate::servers::http::client::Client;
        use crate::servers::http::Started;

        #[tokio::test]
        async fn should_return_ok() {
            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).get("health_check").await;

            assert_eq!(response.status(), 200);
            assert_eq!(response.text().await.unwrap(), r#"{"status":"Ok"}"#);

            env.stop().await;
        }
    }

    mod receiving_an_announce_request {

        // Announce request documentation:
        //
        // BEP 03. The BitTorrent Protocol Specification
        // https://www.bittorrent.org/beps/bep_0003.html
        //
        // BEP 23. Tracker Returns Compact Peer Lists
        // https://www.bittorrent.org/beps/bep_0023.html

        use std::net::Ipv4Addr;
        use std::str::FromStr;

        use torrust_swarm_tracker::servers::http::v1::responses::Peers;
        use torrust_swarm_tracker_primitives::info_hash::InfoHash;
        use torrust_swarm_tracker_primitives::peer;
        use torrust_swarm_tracker_primitives::peer::fixture::PeerBuilder;
        use torrust_swarm_tracker_test_helpers::configuration;

        use crate::servers::http::asserts::{
            announce_response, assert_bencoded_error, compact_peers, contains_compact_peer,
        };
        use crate::servers::http::client::Client;
        use crate::servers::http::requests::QueryBuilder;
        use crate::servers::http::{invalid_info_hashes, Started};

        fn sample_info_hash() -> InfoHash {
            InfoHash::from_str("9c38422213e30bff212b30c360d26f9a02136422").unwrap()
        }

        fn sample_query() -> QueryBuilder {
            QueryBuilder::new(&sample_info_hash(), &peer::Id::from(*b"-qB00000000000000001"), 17548)
        }

        #[tokio::test]
        async fn it_should_start_and_stop() {
            let env = Started::new(&configuration::ephemeral()).await;
            env.stop().await;
        }

        #[tokio::test]
        async fn should_respond_if_only_the_mandatory_fields_are_provided() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().without_param("event").query();

            let response = Client::new(*env.bind_address()).announce(&query).await;

            assert_eq!(response.status(), 200);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_also_be_served_on_the_tracker_path() {
            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address())
                .announce_on("tracker", &sample_query().query())
                .await;

            let announce = announce_response(response).await;

            assert_eq!(announce.interval, 1800);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_url_query_component_is_empty() {
            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).get("announce").await;

            assert_bencoded_error(response, 400, "missing param info_hash").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_a_mandatory_field_is_missing() {
            let env = Started::new(&configuration::ephemeral()).await;

            for param in ["info_hash", "peer_id", "port", "uploaded", "downloaded", "left"] {
                let query = sample_query().without_param(param).query();

                let response = Client::new(*env.bind_address()).announce(&query).await;

                assert_bencoded_error(response, 400, &format!("missing param {param}")).await;
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_info_hash_param_is_invalid() {
            let env = Started::new(&configuration::ephemeral()).await;

            for invalid_value in &invalid_info_hashes() {
                let query = sample_query().with_param("info_hash", invalid_value).query();

                let response = Client::new(*env.bind_address()).announce(&query).await;

                assert_bencoded_error(response, 400, "Cannot parse query params").await;
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_port_param_is_invalid() {
            let env = Started::new(&configuration::ephemeral()).await;

            for invalid_value in ["-1", "1.1", "a", "65536"] {
                let query = sample_query().with_param("port", invalid_value).query();

                let response = Client::new(*env.bind_address()).announce(&query).await;

                assert_bencoded_error(response, 400, "port").await;
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_a_number_of_bytes_param_is_invalid() {
            let env = Started::new(&configuration::ephemeral()).await;

            for param in ["uploaded", "downloaded", "left"] {
                for invalid_value in ["-1", "1.1", "a"] {
                    let query = sample_query().with_param(param, invalid_value).query();

                    let response = Client::new(*env.bind_address()).announce(&query).await;

                    assert_bencoded_error(response, 400, param).await;
                }
            }

            env.stop().await;
        }

        #[tokio::test]
        async fn should_fail_when_the_peer_id_param_is_too_long() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().with_param("peer_id", &"a".repeat(21)).query();

            let response = Client::new(*env.bind_address()).announce(&query).await;

            assert_bencoded_error(response, 400, "peer_id").await;

            env.stop().await;
        }

        #[tokio::test]
        async fn should_accept_an_unknown_event_without_changing_the_swarm() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().with_event("paused").query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            assert!(announce.peers.is_empty());

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_the_announce_policy_and_the_requester_as_leecher() {
            let env = Started::new(&configuration::ephemeral_with_full_announce_policy()).await;

            let announce =
                announce_response(Client::new(*env.bind_address()).announce(&sample_query().query()).await).await;

            let policy = &env.config.core.announce_policy;

            assert_eq!(announce.interval, i64::from(policy.interval));
            assert_eq!(announce.min_interval, policy.interval_min.map(i64::from));
            assert_eq!(announce.tracker_id, policy.tracker_id);
            assert_eq!(announce.complete, 0);
            assert_eq!(announce.incomplete, 1);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_count_the_requester_as_seeder_when_it_has_nothing_left() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().with_left(0).query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            assert_eq!(announce.complete, 1);
            assert_eq!(announce.incomplete, 0);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_a_compact_peer_list_by_default() {
            let env = Started::new(&configuration::ephemeral()).await;

            let announce =
                announce_response(Client::new(*env.bind_address()).announce(&sample_query().query()).await).await;

            // The requester is listed too.
            assert_eq!(compact_peers(&announce).len(), 1);
            assert!(contains_compact_peer(&announce, Ipv4Addr::LOCALHOST, 17548));

            env.stop().await;
        }

        #[tokio::test]
        async fn should_list_the_other_peers_of_the_swarm() {
            let env = Started::new(&configuration::ephemeral()).await;

            let previously_announced_peer = PeerBuilder::default()
                .with_peer_id(&peer::Id::from(*b"-qB00000000000000002"))
                .with_ip("126.0.0.1")
                .with_port(8080)
                .build();

            env.add_torrent_peer(&sample_info_hash(), &previously_announced_peer).await;

            let announce = announce_response(
                Client::new(*env.bind_address())
                    .announce(&sample_query().with_compact().query())
                    .await,
            )
            .await;

            assert_eq!(compact_peers(&announce).len(), 2);
            assert!(contains_compact_peer(&announce, Ipv4Addr::new(126, 0, 0, 1), 8080));

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_a_list_of_dictionaries_when_the_client_does_not_accept_compact_lists() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().without_compact().query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            let Peers::Normal(peers) = announce.peers else {
                panic!("expected a list of dictionaries");
            };

            assert_eq!(peers.len(), 1);
            assert_eq!(peers[0].peer_id, b"-qB00000000000000001".to_vec());
            assert_eq!(peers[0].ip, "127.0.0.1");
            assert_eq!(peers[0].port, 17548);

            env.stop().await;
        }

        #[tokio::test]
        async fn should_leave_the_peer_ids_out_when_the_client_sends_no_peer_id() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().without_compact().with_no_peer_id().query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            let Peers::Normal(peers) = announce.peers else {
                panic!("expected a list of dictionaries");
            };

            assert!(peers.iter().all(|peer| peer.peer_id.is_empty()));

            env.stop().await;
        }

        #[tokio::test]
        async fn should_store_the_ip_sent_by_the_client() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().with_ip("198.51.100.7").query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            assert!(contains_compact_peer(&announce, Ipv4Addr::new(198, 51, 100, 7), 17548));

            env.stop().await;
        }

        #[tokio::test]
        async fn should_return_no_more_peers_than_the_client_wants() {
            let env = Started::new(&configuration::ephemeral()).await;

            for id in 2..=5 {
                let peer = PeerBuilder::default().with_peer_id(&peer::Id::from(id)).build();
                env.add_torrent_peer(&sample_info_hash(), &peer).await;
            }

            let query = sample_query().with_numwant(2).query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            assert_eq!(compact_peers(&announce).len(), 2);

            env.stop().await;
        }

        #[tokio::test]
        async fn a_stopped_peer_should_get_an_empty_response_and_leave_the_swarm() {
            let env = Started::new(&configuration::ephemeral()).await;
            let client = Client::new(*env.bind_address());

            // The peer joins
            client.announce(&sample_query().query()).await;

            // and leaves
            let response = client.announce(&sample_query().with_event("stopped").query()).await;

            assert_eq!(response.status(), 200);
            assert!(response.bytes().await.unwrap().is_empty());

            // Another peer no longer sees it
            let other_peer = QueryBuilder::new(&sample_info_hash(), &peer::Id::from(*b"-qB00000000000000002"), 6881)
                .with_event("completed")
                .query();

            let announce = announce_response(client.announce(&other_peer).await).await;

            assert!(!contains_compact_peer(&announce, Ipv4Addr::LOCALHOST, 17548));

            env.stop().await;
        }

        #[tokio::test]
        async fn a_completed_event_should_not_add_the_peer_to_the_swarm() {
            let env = Started::new(&configuration::ephemeral()).await;

            let query = sample_query().with_event("completed").query();

            let announce = announce_response(Client::new(*env.bind_address()).announce(&query).await).await;

            assert!(announce.peers.is_empty());

            env.stop().await;
        }

        #[tokio::test]
        async fn should_send_a_request_id_back() {
            let env = Started::new(&configuration::ephemeral()).await;

            let response = Client::new(*env.bind_address()).announce(&sample_query().query()).await;

            assert!(response.headers().contains_key("x-request-id"));

            env.stop().await;
        }
    }
}
