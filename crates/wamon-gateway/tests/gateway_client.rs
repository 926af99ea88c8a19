//! HTTP-level tests for GatewayClient against a mock gateway

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wamon_core::{ConnectionStatus, Error};
use wamon_gateway::{GatewayApi, GatewayClient, StaticApiKey};

fn client(server: &MockServer) -> GatewayClient {
    GatewayClient::new(
        &server.uri(),
        Arc::new(StaticApiKey::new("mude-me")),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn fetch_instances_maps_fields_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/fetchInstances"))
        .and(header("apikey", "mude-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"instance": {
                "instanceName": "shop1",
                "status": "open",
                "profilePictureUrl": "https://cdn.example/shop1.jpg"
            }},
            {"instance": {
                "instanceName": "shop2",
                "status": "close"
            }}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let instances = client(&server).fetch_instances().await.unwrap();

    assert_eq!(instances.len(), 2);
    assert_eq!(instances[0].name, "shop1");
    assert_eq!(instances[0].status, ConnectionStatus::Open);
    assert_eq!(
        instances[0].profile_picture_url.as_deref(),
        Some("https://cdn.example/shop1.jpg")
    );
    assert_eq!(instances[1].name, "shop2");
    assert_eq!(instances[1].status, ConnectionStatus::Close);
    assert!(instances[1].profile_picture_url.is_none());
}

#[tokio::test]
async fn create_then_fetch_surfaces_new_instance() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/instance/create"))
        .and(header("apikey", "mude-me"))
        .and(body_partial_json(json!({
            "instanceName": "shop1",
            "number": "+15551234567",
            "qrcode": true,
            "integration": "WHATSAPP-BAILEYS"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "instance": {"instanceName": "shop1", "status": "close"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instance/fetchInstances"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"instance": {"instanceName": "shop1", "status": "close"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client
        .create_instance("shop1", "+15551234567")
        .await
        .unwrap();

    let instances = client.fetch_instances().await.unwrap();
    assert!(instances.iter().any(|i| i.name == "shop1"));
}

#[tokio::test]
async fn request_connection_returns_pairing_code() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/connect/shop1"))
        .and(query_param("number", "+15551234567"))
        .and(header("apikey", "mude-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": "ABC123"})))
        .expect(1)
        .mount(&server)
        .await;

    let code = client(&server)
        .request_connection("shop1", Some("+15551234567"))
        .await
        .unwrap();

    assert_eq!(code.as_deref(), Some("ABC123"));
}

#[tokio::test]
async fn request_connection_without_code_yet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/connect/shop1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let code = client(&server).request_connection("shop1", None).await.unwrap();
    assert!(code.is_none());
}

#[tokio::test]
async fn connection_state_accepts_both_wire_shapes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/connectionState/nested"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"instance": {"state": "open"}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/instance/connectionState/flat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "close",
            "details": "logged out"
        })))
        .mount(&server)
        .await;

    let client = client(&server);

    let nested = client.connection_state("nested").await.unwrap();
    assert!(nested.is_open());

    let flat = client.connection_state("flat").await.unwrap();
    assert!(!flat.is_open());
    assert_eq!(flat.detail.as_deref(), Some("logged out"));
}

#[tokio::test]
async fn logout_and_delete_use_delete_method() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/instance/logout/shop1"))
        .and(header("apikey", "mude-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/instance/delete/shop1"))
        .and(header("apikey", "mude-me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "SUCCESS"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.logout("shop1").await.unwrap();
    client.delete_instance("shop1").await.unwrap();
}

#[tokio::test]
async fn gateway_error_extracts_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/connectionState/ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Instance not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).connection_state("ghost").await.unwrap_err();
    match err {
        Error::Gateway { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Instance not found");
        }
        other => panic!("expected Gateway error, got {other:?}"),
    }
}

#[tokio::test]
async fn gateway_error_falls_back_to_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/instance/delete/shop1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client(&server).delete_instance("shop1").await.unwrap_err();
    match err {
        Error::Gateway { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Gateway request failed");
        }
        other => panic!("expected Gateway error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_when_gateway_unreachable() {
    // Port 1 is never listening
    let client = GatewayClient::new(
        "http://127.0.0.1:1",
        Arc::new(StaticApiKey::new("k")),
        Duration::from_millis(200),
    )
    .unwrap();

    let err = client.fetch_instances().await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }));
}

#[tokio::test]
async fn instance_names_are_percent_encoded_in_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/instance/connectionState/my shop"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"instance": {"state": "close"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    // wiremock decodes the request path, so a mock on the decoded path
    // proves the client encoded the space correctly on the wire.
    let state = client(&server).connection_state("my shop").await.unwrap();
    assert!(!state.is_open());
}
