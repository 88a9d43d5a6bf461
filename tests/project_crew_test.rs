mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

fn project_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "Warehouse extension works",
        "contracting_company": "Constructora Andes",
        "start_date": "2024-04-01",
        "end_date": "2024-12-20",
        "budget": 80_000_000_i64,
        "activities": [
            {
                "name": "Foundations",
                "description": "Excavation and concrete pour",
                "start_date": "2024-04-01",
                "end_date": "2024-05-15"
            }
        ]
    })
}

#[tokio::test]
async fn project_lifecycle_with_activities() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/v1/projects", project_body("Extension A")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Append a second activity.
    let (status, body) = app
        .post(
            &format!("/api/v1/projects/{id}/activities"),
            json!({
                "name": "Steel frame",
                "start_date": "2024-05-16",
                "end_date": "2024-07-30"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["activities"].as_array().unwrap().len(), 2);

    // Mark the first one done by index.
    let (status, body) = app
        .put(
            &format!("/api/v1/projects/{id}/activities/0/status"),
            json!({ "done": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["activities"][0]["done"], true);
    assert_eq!(body["data"]["activities"][1]["done"], false);

    // Out-of-range index is a validation error.
    let (status, _) = app
        .put(
            &format!("/api/v1/projects/{id}/activities/7/status"),
            json!({ "done": true }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn inverted_project_dates_are_rejected() {
    let app = TestApp::new().await;
    let mut body = project_body("Backwards");
    body["start_date"] = json!("2025-01-01");
    body["end_date"] = json!("2024-01-01");

    let (status, _) = app.post("/api/v1/projects", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_budget_is_rejected() {
    let app = TestApp::new().await;
    let mut body = project_body("Too expensive");
    body["budget"] = json!(1_000_000_000_i64);

    let (status, _) = app.post("/api/v1/projects", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn crew_assignment_lifecycle() {
    let app = TestApp::new().await;
    let (_, body) = app.post("/api/v1/projects", project_body("Crewed site")).await;
    let project_id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/v1/crews",
            json!({ "project_id": project_id, "participants": ["12345678-9", "23456789-0"] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let crew_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "assigned");

    let (status, body) = app
        .put(
            &format!("/api/v1/crews/{crew_id}/status"),
            json!({ "status": "in_progress" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "in_progress");

    let (status, _) = app
        .put(
            &format!("/api/v1/crews/{crew_id}/status"),
            json!({ "status": "paused" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .put(
            &format!("/api/v1/crews/{crew_id}/participants"),
            json!({ "participants": ["12345678-9"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["participants"].as_array().unwrap().len(), 1);

    let (status, _) = app.delete(&format!("/api/v1/crews/{crew_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&format!("/api/v1/crews/{crew_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_rut_is_rejected() {
    let app = TestApp::new().await;
    let user = json!({
        "username": "ana",
        "rut": "12345678-9",
        "email": "ana@worksite.example",
        "roles": ["admin"]
    });
    let (status, _) = app.post("/api/v1/users", user.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut second = user;
    second["username"] = json!("ana2");
    second["email"] = json!("ana2@worksite.example");
    let (status, _) = app.post("/api/v1/users", second).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
