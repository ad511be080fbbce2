mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use std::sync::Arc;
use tonic::Code;
use url_shortener_gateway::api::handlers::save_url_handler;

fn make_server(max_attempts: u32) -> (TestServer, Arc<common::TestGateway>) {
    let (state, gateway) = common::create_test_state(max_attempts);
    let app = Router::new()
        .route("/url", post(save_url_handler))
        .with_state(state);
    (common::make_server(app), gateway)
}

#[tokio::test]
async fn test_save_with_alias_success() {
    let (server, gateway) = make_server(3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "alias": "ex" }));

    let record = gateway.transport().get("ex").unwrap();
    assert_eq!(record.url, "https://example.com");
    assert_eq!(gateway.transport().set_url_calls(), 1);
}

#[tokio::test]
async fn test_save_generates_alias() {
    let (server, gateway) = make_server(3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let alias = json["alias"].as_str().unwrap();
    assert_eq!(alias.len(), 8);
    assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));

    let record = gateway.transport().get(alias).unwrap();
    assert_eq!(record.url, "https://example.com/some/long/path");
}

#[tokio::test]
async fn test_save_empty_alias_generates_one() {
    let (server, _gateway) = make_server(3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["alias"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn test_save_alias_conflict() {
    let (server, gateway) = make_server(3);
    gateway.transport().insert("https://old.example.com", "ex");

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    response.assert_json(&json!({ "error": "alias already exists" }));

    assert_eq!(gateway.transport().set_url_calls(), 1);
    assert_eq!(
        gateway.transport().get("ex").unwrap().url,
        "https://old.example.com"
    );
}

#[tokio::test]
async fn test_save_invalid_url() {
    let (server, gateway) = make_server(3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "field url is not a valid URL");
    assert_eq!(json["fields"]["url"][0], "field url is not a valid URL");

    assert_eq!(gateway.transport().set_url_calls(), 0);
}

#[tokio::test]
async fn test_save_missing_url() {
    let (server, gateway) = make_server(3);

    let response = server.post("/url").json(&json!({ "alias": "ex" })).await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"], "field url is a required field");
    assert_eq!(gateway.transport().set_url_calls(), 0);
}

#[tokio::test]
async fn test_save_malformed_body() {
    let (server, gateway) = make_server(3);

    let response = server
        .post("/url")
        .content_type("application/json")
        .bytes("{\"url\": ".into())
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "failed to decode request body" }));
    assert_eq!(gateway.transport().set_url_calls(), 0);
}

#[tokio::test]
async fn test_save_retries_transient_failures() {
    let (server, gateway) = make_server(3);
    gateway.transport().fail_next(Code::Aborted, 2);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "alias": "ex" }));
    assert_eq!(gateway.transport().set_url_calls(), 3);
}

#[tokio::test]
async fn test_save_retries_exhausted() {
    let (server, gateway) = make_server(3);
    gateway.transport().fail_next(Code::Aborted, 3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status_internal_server_error();
    response.assert_json(&json!({ "error": "internal error" }));
    assert_eq!(gateway.transport().set_url_calls(), 3);
    assert!(gateway.transport().get("ex").is_none());
}

#[tokio::test]
async fn test_save_non_retryable_failure() {
    let (server, gateway) = make_server(3);
    gateway.transport().fail_next(Code::Unavailable, 1);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com", "alias": "ex" }))
        .await;

    response.assert_status_internal_server_error();
    response.assert_json(&json!({ "error": "internal error" }));
    assert_eq!(gateway.transport().set_url_calls(), 1);
}

#[tokio::test]
async fn test_save_rejects_url_with_newline() {
    let (server, gateway) = make_server(3);

    let response = server
        .post("/url")
        .json(&json!({ "url": "https://example.com/a\nb", "alias": "nl" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["fields"]["url"][0], "field url is not a valid URL");

    assert_eq!(gateway.transport().set_url_calls(), 0);
    assert!(gateway.transport().get("nl").is_none());
}
