//! Mocks the anchor chain's JSON-RPC endpoint the way the teacher's
//! `testing::MockServer` mocks a forked network: an `httptest::Server`
//! standing in for the anchor chain, with exact request/response bodies
//! asserted via `Expectation::matching`.

use alloy::primitives::Address;
use httptest::{
    matchers::{eq, json_decoded, request},
    responders::json_encoded,
    Expectation, Server,
};
use rollup_anchor_client::AnchorClient;
use std::time::Duration;

fn connect(server: &Server) -> AnchorClient {
    let url: url::Url = server.url("").to_string().parse().expect("valid mock server url");
    let rollup = Address::with_last_byte(0x01);
    AnchorClient::connect(url, rollup, Duration::from_secs(10)).expect("connect to mock anchor chain")
}

#[tokio::test]
async fn get_transaction_count_decodes_anchor_response() {
    let server = Server::run();
    let account = Address::with_last_byte(0xaa);

    server.expect(
        Expectation::matching(request::body(json_decoded(eq(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "eth_getTransactionCount",
            "params": [account, "latest"],
        })))))
        .respond_with(json_encoded(serde_json::json!({
            "jsonrpc": "2.0",
            "id": 0,
            "result": "0x7",
        }))),
    );

    let client = connect(&server);
    let nonce = client.get_transaction_count(account).await.expect("rpc call succeeds");
    assert_eq!(nonce, 7);
}

#[tokio::test]
async fn dependency_unavailable_surfaces_transport_errors() {
    // No expectation is set up, so the mock server answers every request
    // with a 404; the client must surface this as `DependencyUnavailable`
    // rather than panicking or hanging (spec.md §7).
    let server = Server::run();
    let account = Address::with_last_byte(0xbb);

    let client = connect(&server);
    let result = client.get_transaction_count(account).await;
    assert!(matches!(result, Err(rollup_anchor_client::AnchorClientError::DependencyUnavailable(_))));
}
