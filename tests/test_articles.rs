mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn create_list_delete_lifecycle() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    // Create
    let response = env.create_article(&server, "A").await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let id = created["id"].as_str().expect("created article has an id").to_string();
    assert_eq!(created["title"].as_str(), Some("A"));
    assert!(created["created_at"].as_str().is_some());

    // The new article is the first (newest) list entry
    let response = server.get("/api/articles").await;
    let listed: serde_json::Value = response.json();
    let articles = listed.as_array().unwrap();
    assert_eq!(articles[0]["id"].as_str(), Some(id.as_str()));

    // Delete
    let response = server.delete(&format!("/api/articles/{}", id)).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str(), Some("Article deleted successfully"));

    // Gone from the list
    let response = server.get("/api/articles").await;
    let listed: serde_json::Value = response.json();
    assert!(listed
        .as_array()
        .unwrap()
        .iter()
        .all(|a| a["id"].as_str() != Some(id.as_str())));
}

#[tokio::test]
async fn get_by_id_returns_created_record() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let created: serde_json::Value = env.create_article(&server, "Readable").await.json();
    let id = created["id"].as_str().unwrap();

    let response = server.get(&format!("/api/articles/{}", id)).await;
    let fetched: serde_json::Value = response.json();

    assert_eq!(fetched["title"].as_str(), Some("Readable"));
    assert_eq!(fetched["subtitle"].as_str(), Some("B"));
    assert_eq!(fetched["url"].as_str(), Some("https://x.test"));
    assert_eq!(fetched["author"].as_str(), Some("john-doe"));
    assert_eq!(fetched["created_at"], created["created_at"]);
}

#[tokio::test]
async fn get_unknown_id_is_404() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server.get("/api/articles/no-such-id").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn update_applies_partial_field_set() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let created: serde_json::Value = env.create_article(&server, "Before").await.json();
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/articles/{}", id))
        .json(&serde_json::json!({ "title": "After" }))
        .await;
    let updated: serde_json::Value = response.json();

    assert_eq!(updated["title"].as_str(), Some("After"));
    // Untouched fields survive
    assert_eq!(updated["subtitle"].as_str(), Some("B"));
    assert_eq!(updated["newsletter"].as_str(), Some("weekly-digest"));
}

#[tokio::test]
async fn update_unknown_id_is_404() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .put("/api/articles/no-such-id")
        .json(&serde_json::json!({ "title": "After" }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn update_with_empty_catalog_field_is_400() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let created: serde_json::Value = env.create_article(&server, "Before").await.json();
    let id = created["id"].as_str().unwrap();

    let response = server
        .put(&format!("/api/articles/{}", id))
        .json(&serde_json::json!({ "author": "", "newsletter": "" }))
        .await;
    response.assert_status_bad_request();

    // The stored record keeps its catalog values
    let fetched: serde_json::Value = server.get(&format!("/api/articles/{}", id)).await.json();
    assert_eq!(fetched["author"].as_str(), Some("john-doe"));
    assert_eq!(fetched["newsletter"].as_str(), Some("weekly-digest"));
}

#[tokio::test]
async fn delete_nonexistent_id_reports_success() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    let response = server.delete("/api/articles/no-such-id").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"].as_str(), Some("Article deleted successfully"));
}

#[tokio::test]
async fn create_with_missing_field_is_400() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/articles")
        .json(&serde_json::json!({
            "title": "A",
            "subtitle": "B",
            "url": "https://x.test"
        }))
        .await;
    response.assert_status_bad_request();

    let listed: serde_json::Value = server.get("/api/articles").await.json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_relative_url_is_400() {
    let env = common::TestEnv::start().await;
    let server = env.server_permissive();

    let response = server
        .post("/api/articles")
        .json(&serde_json::json!({
            "title": "A",
            "subtitle": "B",
            "url": "not-a-url",
            "author": "john-doe",
            "channel": "web",
            "category": "technology",
            "newsletter": "weekly-digest",
            "topic": "javascript"
        }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn list_is_ordered_newest_first() {
    let env = common::TestEnv::start().await;
    let server = env.server();

    for (title, created_at) in [
        ("Middle", "2024-03-01T00:00:00Z"),
        ("Oldest", "2024-01-01T00:00:00Z"),
        ("Newest", "2024-06-01T00:00:00Z"),
    ] {
        server
            .post("/api/articles")
            .json(&serde_json::json!({
                "title": title,
                "subtitle": "B",
                "url": "https://x.test",
                "author": "john-doe",
                "channel": "web",
                "category": "technology",
                "newsletter": "weekly-digest",
                "topic": "javascript",
                "created_at": created_at
            }))
            .await;
    }

    let listed: serde_json::Value = server.get("/api/articles").await.json();
    let titles: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}
