mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn seeded_defaults_are_served() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let body: serde_json::Value = server.get("/api/options/authors").await.json();
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();

    assert!(values.contains(&"john-doe"));
    assert!(values.contains(&"jane-smith"));
}

#[tokio::test]
async fn every_category_responds() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    for category in ["authors", "channels", "categories", "newsletters", "topics"] {
        let response = server.get(&format!("/api/options/{}", category)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(!body.as_array().unwrap().is_empty(), "category {}", category);
    }
}

#[tokio::test]
async fn unknown_type_is_400() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/options/bogus-type").await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Invalid type"));

    let response = server
        .post("/api/options/bogus-type")
        .json(&serde_json::json!({ "value": "x", "label": "X" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn created_value_persists_across_requests() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server
        .post("/api/options/topics")
        .json(&serde_json::json!({ "value": "rust", "label": "Rust" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    assert!(created["id"].as_str().is_some());
    assert_eq!(created["value"].as_str(), Some("rust"));

    let body: serde_json::Value = server.get("/api/options/topics").await.json();
    let values: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["value"].as_str().unwrap())
        .collect();
    assert!(values.contains(&"rust"));
}

#[tokio::test]
async fn duplicate_value_in_category_is_409() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let first = server
        .post("/api/options/topics")
        .json(&serde_json::json!({ "value": "rust", "label": "Rust" }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/api/options/topics")
        .json(&serde_json::json!({ "value": "rust", "label": "Rust (again)" }))
        .await;
    second.assert_status(StatusCode::CONFLICT);

    let body: serde_json::Value = server.get("/api/options/topics").await.json();
    let rust_entries = body
        .as_array()
        .unwrap()
        .iter()
        .filter(|o| o["value"].as_str() == Some("rust"))
        .count();
    assert_eq!(rust_entries, 1);
}

#[tokio::test]
async fn create_requires_value_and_label() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/options/topics")
        .json(&serde_json::json!({ "label": "No value" }))
        .await;
    response.assert_status_bad_request();
}
