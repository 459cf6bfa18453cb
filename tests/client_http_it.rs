// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

mod common;

use std::time::Duration;
use httpmock::prelude::*;
use instagram_client::{Client, ClientConfig, Endpoints, Error, HttpConfig};
use serde_json::json;

#[test]
fn public_call_carries_client_id_and_accept_header() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/users/search")
            .query_param("client_id", "key")
            .query_param("q", "jack")
            .query_param("count", "5")
            .header("accept", "application/json");
        then.status(200).json_body(json!({"meta": {"code": 200}, "data": [{"id": "1"}]}));
    });

    let envelope = common::client(&server)
        .search_users("jack", Some(5))
        .expect("User search should succeed.");

    mock.assert();
    assert_eq!(envelope["data"][0]["id"], "1");
}

#[test]
fn authenticated_call_carries_access_token() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/v1/users/self/feed")
            .query_param("access_token", "t0k")
            .query_param("count", "2");
        then.status(200).json_body(json!({"data": []}));
    });

    common::authenticated_client(&server).user_feed(Some(2)).expect("Feed request should succeed.");
    mock.assert();
}

#[test]
fn missing_token_never_hits_the_network() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.any_request();
        then.status(200).json_body(json!({}));
    });

    let client = common::client(&server);
    assert!(matches!(client.current_user(), Err(Error::AuthenticationRequired)));
    assert!(matches!(client.like_media(1), Err(Error::AuthenticationRequired)));
    assert!(matches!(client.unlike_media(1), Err(Error::AuthenticationRequired)));
    assert!(matches!(client.tag_media("rust", Some(0)), Err(Error::InvalidParameter(_))));
    assert!(matches!(client.modify_relationship("dance", 42), Err(Error::InvalidParameter(_))));
    mock.assert_calls(0);
}

#[test]
fn post_sends_form_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/media/7/comments")
            .query_param("access_token", "t0k")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("text=nice+shot");
        then.status(200).json_body(json!({"meta": {"code": 200}, "data": null}));
    });

    let envelope = common::authenticated_client(&server)
        .add_media_comment(7, "nice shot")
        .expect("Comment should be posted.");

    mock.assert();
    assert_eq!(envelope["meta"]["code"], 200);
}

#[test]
fn relationship_action_is_posted() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/users/42/relationship").body("action=follow");
        then.status(200).json_body(json!({"data": {"outgoing_status": "follows"}}));
    });

    let envelope = common::authenticated_client(&server)
        .modify_relationship("follow", 42)
        .expect("Relationship should be modified.");

    mock.assert();
    assert_eq!(envelope["data"]["outgoing_status"], "follows");
}

#[test]
fn delete_uses_delete_verb() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/v1/media/7/comments/9").query_param("access_token", "t0k");
        then.status(200).json_body(json!({"meta": {"code": 200}}));
    });

    common::authenticated_client(&server)
        .delete_media_comment(7, 9)
        .expect("Comment should be deleted.");
    mock.assert();
}

#[test]
fn error_status_without_body_is_a_transport_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v1/media/popular");
        then.status(502);
    });

    let err = common::client(&server).popular_media().expect_err("Empty 502 must fail.");
    assert!(matches!(err, Error::Transport(_)), "unexpected error: {:?}", err);
}

#[test]
fn error_status_with_envelope_is_passed_through() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v1/media/1");
        then.status(400).json_body(json!({
            "meta": {"code": 400, "error_type": "APINotFoundError", "error_message": "invalid media id"}
        }));
    });

    let envelope = common::client(&server).media(1).expect("Error envelope should be decoded.");
    assert_eq!(envelope["meta"]["error_type"], "APINotFoundError");
}

#[test]
fn malformed_json_is_a_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v1/locations/1");
        then.status(200).body("<html>maintenance</html>");
    });

    let err = common::client(&server).location(1).expect_err("HTML body must fail to decode.");
    assert!(matches!(err, Error::ResponseDecode(_)), "unexpected error: {:?}", err);
}

#[test]
fn overall_timeout_is_enforced() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.path("/v1/tags/rust");
        then.status(200).json_body(json!({})).delay(Duration::from_secs(3));
    });

    let http = HttpConfig { timeout: Duration::from_millis(300), ..common::http_config() };
    let client = Client::with_http_config(common::config(&server), http).expect("Failed to build HTTP client.");

    let err = client.tag("rust").expect_err("Slow response must time out.");
    assert!(matches!(err, Error::Transport(_)), "unexpected error: {:?}", err);
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let config = ClientConfig::public("key")
        .expect("Failed to build client configuration.")
        .with_endpoints(Endpoints::with_origin("http://127.0.0.1:9").expect("URL should be valid."));
    let client = Client::with_http_config(config, common::http_config()).expect("Failed to build HTTP client.");

    let err = client.popular_media().expect_err("Nothing listens on the discard port.");
    assert!(matches!(err, Error::Transport(_)), "unexpected error: {:?}", err);
}
