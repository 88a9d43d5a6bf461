mod common;

use axum::http::StatusCode;
use common::{seed_entry, seed_material, seed_warehouse, TestApp};
use serde_json::json;

#[tokio::test]
async fn create_requires_resolvable_references() {
    let app = TestApp::new().await;
    let warehouse_id = seed_warehouse(&app, "North yard").await;

    let (status, body) = app
        .post(
            "/api/v1/inventory",
            json!({
                "material_id": "00000000-0000-0000-0000-000000000001",
                "warehouse_id": warehouse_id,
                "quantity": 5,
                "entered_by": "tester@worksite.example"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");
}

#[tokio::test]
async fn adjust_round_trip_restores_quantity() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Sand", None).await;
    let warehouse_id = seed_warehouse(&app, "South yard").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 20).await;

    let (status, body) = app
        .post(
            &format!("/api/v1/inventory/{entry_id}/adjust"),
            json!({ "delta": 7, "adjusted_by": "foreman@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 27);

    let (status, body) = app
        .post(
            &format!("/api/v1/inventory/{entry_id}/adjust"),
            json!({ "delta": -7, "adjusted_by": "foreman@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 20);
}

#[tokio::test]
async fn overdraw_is_rejected_and_leaves_quantity_unchanged() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Bricks", None).await;
    let warehouse_id = seed_warehouse(&app, "Brick shed").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 3).await;

    let (status, body) = app
        .post(
            &format!("/api/v1/inventory/{entry_id}/adjust"),
            json!({ "delta": -4, "adjusted_by": "foreman@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");

    let (status, body) = app.get(&format!("/api/v1/inventory/{entry_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["quantity"], 3);
}

#[tokio::test]
async fn zero_delta_is_a_validation_error() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Nails", None).await;
    let warehouse_id = seed_warehouse(&app, "Tool room").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 1).await;

    let (status, _) = app
        .post(
            &format!("/api/v1/inventory/{entry_id}/adjust"),
            json!({ "delta": 0, "adjusted_by": "foreman@worksite.example" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn audit_trail_records_every_accepted_adjustment() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Plywood", None).await;
    let warehouse_id = seed_warehouse(&app, "Sheet storage").await;
    let entry_id = seed_entry(&app, &material_id, &warehouse_id, 10).await;

    app.post(
        &format!("/api/v1/inventory/{entry_id}/adjust"),
        json!({ "delta": 5, "adjusted_by": "ana@worksite.example", "reason": "delivery" }),
    )
    .await;
    app.post(
        &format!("/api/v1/inventory/{entry_id}/adjust"),
        json!({ "delta": -2, "adjusted_by": "ana@worksite.example" }),
    )
    .await;

    let (status, body) = app
        .get(&format!("/api/v1/inventory/{entry_id}/adjustments"))
        .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    // Opening stock plus the two adjustments.
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["delta"], -2);
    assert_eq!(rows[0]["quantity_after"], 13);
    assert_eq!(rows[0]["adjusted_by"], "ana@worksite.example");
}

#[tokio::test]
async fn detailed_list_joins_material_and_warehouse() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Cables", None).await;
    let warehouse_id = seed_warehouse(&app, "Electrical store").await;
    seed_entry(&app, &material_id, &warehouse_id, 8).await;

    let (status, body) = app.get("/api/v1/inventory").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["material"]["name"], "Cables");
    assert_eq!(items[0]["warehouse"]["name"], "Electrical store");
    assert_eq!(items[0]["quantity"], 8);
}
