mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::BASE_URL;

#[tokio::test]
async fn test_stats_for_new_url() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    let created = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<Value>();
    let code = created["shortCode"].as_str().unwrap();

    let response = server.get(&format!("/api/stats/{code}")).await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["originalUrl"], "https://example.com/a");
    assert_eq!(json["shortCode"], code);
    assert_eq!(json["shortUrl"], format!("{BASE_URL}/{code}"));
    assert_eq!(json["clicks"], 0);
    assert_eq!(json["createdAt"], created["createdAt"]);
    assert_eq!(json["expired"], false);
}

#[tokio::test]
async fn test_stats_do_not_count_as_clicks() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    let code = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json::<Value>()["shortCode"]
        .as_str()
        .unwrap()
        .to_string();

    for _ in 0..3 {
        server.get(&format!("/api/stats/{code}")).await.assert_status_ok();
    }

    let json = server
        .get(&format!("/api/stats/{code}"))
        .await
        .json::<Value>();
    assert_eq!(json["clicks"], 0);
}

#[tokio::test]
async fn test_stats_not_found() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    let response = server.get("/api/stats/missing").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_websocket_stats_without_clients() {
    let app = common::create_test_app();
    let server = common::test_server(&app);

    let response = server.get("/api/stats/websocket").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["connectedClients"], 0);
    assert_eq!(json["status"], "OK");
    assert!(json["timestamp"].is_string());
}
