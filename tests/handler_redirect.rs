mod common;

use axum_test::TestServer;
use snaplink::domain::store::KeyValueStore;

#[tokio::test]
async fn test_redirect_known_key() {
    let (state, store) = common::create_test_state();
    store
        .put("abc123", "https://example.com/target", None)
        .await
        .unwrap();

    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/abc123").await;

    response.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_unknown_key_is_not_found() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/nosuch").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_shorten_then_redirect_roundtrip() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&serde_json::json!({ "url": "https://example.com" }))
        .await;
    response.assert_status_ok();

    let key = response.json::<serde_json::Value>()["key"]
        .as_str()
        .unwrap()
        .to_string();

    let redirect = server.get(&format!("/{key}")).await;
    redirect.assert_status(axum::http::StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(redirect.header("location"), "https://example.com/");
}

#[tokio::test]
async fn test_health_reports_ok() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
}
