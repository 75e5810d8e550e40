mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

async fn shorten_all(server: &axum_test::TestServer, urls: &[&str]) {
    for url in urls {
        server
            .post("/api/shorten")
            .json(&json!({ "url": url }))
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_list_empty() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    let response = server.get("/api/urls").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    shorten_all(
        &server,
        &[
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ],
    )
    .await;

    let json = server.get("/api/urls").await.json::<Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["originalUrl"], "https://example.com/3");
    assert_eq!(items[2]["originalUrl"], "https://example.com/1");
    assert_eq!(items[0]["clicks"], 0);
}

#[tokio::test]
async fn test_list_offset_and_limit() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    shorten_all(
        &server,
        &[
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
            "https://example.com/4",
        ],
    )
    .await;

    let json = server
        .get("/api/urls")
        .add_query_param("offset", 1)
        .add_query_param("limit", 2)
        .await
        .json::<Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["originalUrl"], "https://example.com/3");
    assert_eq!(items[1]["originalUrl"], "https://example.com/2");
}

#[tokio::test]
async fn test_list_rejects_invalid_params() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    for (key, value) in [("limit", "0"), ("limit", "1001"), ("offset", "-1"), ("limit", "ten")] {
        let response = server.get("/api/urls").add_query_param(key, value).await;
        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "{key}={value}"
        );
    }
}
