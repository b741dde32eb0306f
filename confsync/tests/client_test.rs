//! Tests for the API transport

use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use confsync::{ApiClient, BackendConfig, MigrateError};

fn backend(url: &str) -> BackendConfig {
    BackendConfig {
        api_url: url.to_string(),
        api_token: "secret-token".to_string(),
        allow_self_signed_certs: false,
    }
}

#[tokio::test]
async fn test_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings/api-tokens"))
        .and(header("authorization", "apiToken secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = ApiClient::new(&backend(&server.uri())).unwrap();
    let body = api.get("/settings/api-tokens").await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_trimmed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings/slo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = ApiClient::new(&backend(&format!("{}/", server.uri()))).unwrap();
    assert!(api.get("/settings/slo").await.is_ok());
}

#[tokio::test]
async fn test_non_2xx_carries_status_url_and_pretty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events/settings/alerts"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"errors": ["no such tenant"]})),
        )
        .mount(&server)
        .await;

    let api = ApiClient::new(&backend(&server.uri())).unwrap();
    let err = api.get("/events/settings/alerts").await.unwrap_err();

    match &err {
        MigrateError::Api { status, url, details } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/events/settings/alerts"));
            // JSON bodies are pretty-printed for operators
            assert!(details.contains("\"errors\""));
            assert!(details.contains('\n'));
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn test_non_json_error_body_kept_raw() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/settings/rbac/groups"))
        .respond_with(ResponseTemplate::new(400).set_body_string("plain text failure"))
        .mount(&server)
        .await;

    let api = ApiClient::new(&backend(&server.uri())).unwrap();
    let err = api
        .post("/settings/rbac/groups", &json!({"name": "g"}))
        .await
        .unwrap_err();

    match err {
        MigrateError::Api { status, details, .. } => {
            assert_eq!(status, 400);
            assert_eq!(details, "plain text failure");
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn test_empty_body_decodes_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/settings/v2/maintenance/m1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let api = ApiClient::new(&backend(&server.uri())).unwrap();
    let body = api
        .put("/settings/v2/maintenance/m1", &json!({"id": "m1"}))
        .await
        .unwrap();
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_connection_failure_is_request_error() {
    // Grab a port that nothing is listening on anymore
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = ApiClient::new(&backend(&uri)).unwrap();
    let err = api.get("/settings/slo").await.unwrap_err();

    match err {
        MigrateError::Request { url, .. } => assert!(url.ends_with("/settings/slo")),
        other => panic!("expected Request error, got: {other}"),
    }
}

#[tokio::test]
async fn test_invalid_base_url_rejected_at_construction() {
    let err = ApiClient::new(&backend("not a url")).unwrap_err();
    assert!(matches!(err, MigrateError::Config(_)));
}
