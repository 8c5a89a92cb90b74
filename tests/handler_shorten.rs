mod common;

use axum_test::TestServer;
use serde_json::json;
use snaplink::domain::store::KeyValueStore;

#[tokio::test]
async fn test_shorten_allocates_six_char_key() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    let key = body["key"].as_str().unwrap();
    assert_eq!(key.len(), 6);
    assert_eq!(
        body["short_url"],
        format!("{}/{}", common::TEST_BASE_URL, key)
    );
    assert_eq!(
        body["qr_url"],
        format!("{}/{}/qr", common::TEST_BASE_URL, key)
    );

    // The target is stored exactly under the allocated key
    let stored = store.get(key).await.unwrap();
    assert_eq!(stored.as_deref(), Some("https://example.com/"));
}

#[tokio::test]
async fn test_shorten_with_custom_key() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_key": "my-link" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["key"], "my-link");

    assert!(store.get("my-link").await.unwrap().is_some());
}

#[tokio::test]
async fn test_shorten_custom_key_conflict_does_not_overwrite() {
    let (state, store) = common::create_test_state();
    store
        .put("foo", "https://existing.example/", None)
        .await
        .unwrap();

    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_key": "foo" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "conflict");

    // The previously stored target is untouched
    assert_eq!(
        store.get("foo").await.unwrap().as_deref(),
        Some("https://existing.example/")
    );
}

#[tokio::test]
async fn test_shorten_rejects_invalid_custom_key() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com", "custom_key": "Not Valid!" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_rejects_invalid_url() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not-a-url" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_dangerous_scheme() {
    let (state, _store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "javascript:alert(1)" }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_normalizes_url_before_storage() {
    let (state, store) = common::create_test_state();
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://EXAMPLE.COM:443/Path#frag" }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    let key = body["key"].as_str().unwrap();

    assert_eq!(
        store.get(key).await.unwrap().as_deref(),
        Some("https://example.com/Path")
    );
}

#[tokio::test]
async fn test_shorten_is_rate_limited() {
    let (state, _store) = common::create_test_state_with_limits(60_000, 3);
    let server = TestServer::new(common::app(state)).unwrap();

    for i in 0..3 {
        let response = server
            .post("/api/shorten")
            .add_header("x-forwarded-for", "203.0.113.7")
            .json(&json!({ "url": format!("https://example.com/{i}") }))
            .await;
        response.assert_status_ok();
    }

    let response = server
        .post("/api/shorten")
        .add_header("x-forwarded-for", "203.0.113.7")
        .json(&json!({ "url": "https://example.com/limited" }))
        .await;

    response.assert_status(axum::http::StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.header("retry-after"), "60");

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "rate_limited");
}

#[tokio::test]
async fn test_rate_limit_buckets_are_per_identity() {
    let (state, _store) = common::create_test_state_with_limits(60_000, 2);
    let server = TestServer::new(common::app(state)).unwrap();

    for i in 0..2 {
        server
            .post("/api/shorten")
            .add_header("x-forwarded-for", "203.0.113.7")
            .json(&json!({ "url": format!("https://example.com/{i}") }))
            .await
            .assert_status_ok();
    }

    // First identity is now exhausted, a different one is not
    server
        .post("/api/shorten")
        .add_header("x-forwarded-for", "203.0.113.7")
        .json(&json!({ "url": "https://example.com/x" }))
        .await
        .assert_status(axum::http::StatusCode::TOO_MANY_REQUESTS);

    server
        .post("/api/shorten")
        .add_header("x-forwarded-for", "198.51.100.2")
        .json(&json!({ "url": "https://example.com/y" }))
        .await
        .assert_status_ok();
}
