mod common;

use axum::http::StatusCode;
use common::{seed_entry, seed_material, seed_warehouse, TestApp};
use serde_json::json;

async fn seed_project(app: &TestApp) -> String {
    let (status, body) = app
        .post(
            "/api/v1/projects",
            json!({
                "title": "Riverside apartments",
                "description": "Two residential towers",
                "contracting_company": "Constructora Andes",
                "start_date": "2024-03-01",
                "end_date": "2025-06-30",
                "budget": 250_000_000_i64,
                "activities": []
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "project create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn assign_then_unassign_restores_on_hand() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Cement", None).await;
    let warehouse_id = seed_warehouse(&app, "Main depot").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 5).await;
    let project_id = seed_project(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/assignments",
            json!({
                "project_id": project_id,
                "assigned_by": "planner@worksite.example",
                "lines": [{ "inventory_entry_id": entry_id, "quantity": 5 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let assignment_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(body["data"]["quantity"], 0);

    let (_, body) = app.get(&format!("/api/v1/assignments/{assignment_id}")).await;
    let line_id = body["data"]["lines"][0]["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .delete_with_body(
            &format!("/api/v1/assignments/{assignment_id}/lines/{line_id}"),
            json!({ "returned_by": "planner@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(body["data"]["quantity"], 5);
}

#[tokio::test]
async fn over_assignment_is_rejected() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Rebar", None).await;
    let warehouse_id = seed_warehouse(&app, "Steel yard").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 3).await;
    let project_id = seed_project(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/assignments",
            json!({
                "project_id": project_id,
                "assigned_by": "planner@worksite.example",
                "lines": [{ "inventory_entry_id": entry_id, "quantity": 4 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");

    let (_, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(body["data"]["quantity"], 3);
}

#[tokio::test]
async fn failing_line_rolls_back_the_whole_batch() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Gravel", None).await;
    let warehouse_id = seed_warehouse(&app, "Aggregate yard").await;
    let plenty = seed_entry(&app, &material_id, &warehouse_id, 100).await;

    let scarce_material = seed_material(&app, "Copper pipe", None).await;
    let scarce = seed_entry(&app, &scarce_material, &warehouse_id, 1).await;
    let project_id = seed_project(&app).await;

    let (status, _) = app
        .post(
            "/api/v1/assignments",
            json!({
                "project_id": project_id,
                "assigned_by": "planner@worksite.example",
                "lines": [
                    { "inventory_entry_id": plenty, "quantity": 10 },
                    { "inventory_entry_id": scarce, "quantity": 2 }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // The first line's deduction must not survive the failed batch.
    let (_, body) = app.get(&format!("/api/v1/inventory/{plenty}")).await;
    assert_eq!(body["data"]["quantity"], 100);
    let (_, body) = app.get(&format!("/api/v1/inventory/{scarce}")).await;
    assert_eq!(body["data"]["quantity"], 1);

    // And no half-written assignment remains.
    let (status, _) = app.get("/api/v1/assignments").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn deleting_assignment_returns_all_stock() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Tiles", None).await;
    let warehouse_id = seed_warehouse(&app, "Finishings store").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 30).await;
    let project_id = seed_project(&app).await;

    let (_, body) = app
        .post(
            "/api/v1/assignments",
            json!({
                "project_id": project_id,
                "assigned_by": "planner@worksite.example",
                "lines": [{ "inventory_entry_id": entry_id, "quantity": 12 }]
            }),
        )
        .await;
    let assignment_id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(body["data"]["quantity"], 18);

    let (status, _) = app
        .delete_with_body(
            &format!("/api/v1/assignments/{assignment_id}"),
            json!({ "returned_by": "planner@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(body["data"]["quantity"], 30);
}

#[tokio::test]
async fn assignment_to_unknown_project_is_not_found() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Paint", None).await;
    let warehouse_id = seed_warehouse(&app, "Paint store").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 4).await;

    let (status, _) = app
        .post(
            "/api/v1/assignments",
            json!({
                "project_id": "00000000-0000-0000-0000-000000000042",
                "assigned_by": "planner@worksite.example",
                "lines": [{ "inventory_entry_id": entry_id, "quantity": 1 }]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
