mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn seed_post(app: &TestApp, title: &str, author: &str) -> String {
    let (status, body) = app
        .post(
            "/api/v1/forum",
            json!({
                "title": title,
                "content": "Reminder: hard hats are mandatory past the fence line.",
                "author": author
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "post create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_and_read_post_with_comments() {
    let app = TestApp::new().await;
    let post_id = seed_post(&app, "Site safety briefing", "maria").await;

    let (status, body) = app
        .put(
            &format!("/api/v1/forum/{post_id}/comments"),
            json!({ "author": "jose", "content": "Understood, passing it on to the night shift." }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let comment_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app.get(&format!("/api/v1/forum/{post_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Site safety briefing");
    assert_eq!(body["data"]["comments"].as_array().unwrap().len(), 1);

    let (status, _) = app
        .delete(&format!("/api/v1/forum/{post_id}/comments/{comment_id}"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/v1/forum/{post_id}")).await;
    assert!(body["data"]["comments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn digits_only_title_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/api/v1/forum",
            json!({
                "title": "20240101",
                "content": "a body that is long enough to pass",
                "author": "maria"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn short_comment_is_rejected() {
    let app = TestApp::new().await;
    let post_id = seed_post(&app, "Concrete pour schedule", "maria").await;

    let (status, _) = app
        .put(
            &format!("/api/v1/forum/{post_id}/comments"),
            json!({ "author": "jose", "content": "ok" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn posts_filtered_by_author() {
    let app = TestApp::new().await;
    seed_post(&app, "Crane inspection due", "maria").await;
    seed_post(&app, "Lunch truck schedule", "jose").await;

    let (status, body) = app.get("/api/v1/forum/author/maria").await;
    assert_eq!(status, StatusCode::OK);
    let posts = body["data"].as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["author"], "maria");
}

#[tokio::test]
async fn deleting_post_removes_its_comments() {
    let app = TestApp::new().await;
    let post_id = seed_post(&app, "Scaffolding teardown", "maria").await;
    app.put(
        &format!("/api/v1/forum/{post_id}/comments"),
        json!({ "author": "jose", "content": "I'll bring the extra harnesses." }),
    )
    .await;

    let (status, _) = app.delete(&format!("/api/v1/forum/{post_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/forum/{post_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
