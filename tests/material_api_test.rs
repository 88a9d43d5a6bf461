mod common;

use axum::http::{Method, StatusCode};
use common::{seed_material, seed_warehouse, TestApp};

#[tokio::test]
async fn create_and_fetch_material() {
    let app = TestApp::new().await;
    let id = seed_material(&app, "Portland cement", Some("779052100423")).await;

    let (status, body) = app.get(&format!("/api/v1/material/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["name"], "Portland cement");
    assert_eq!(body["data"]["unit"], "bag");

    let (status, body) = app.get("/api/v1/material/codigoBarra/779052100423").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"].as_str().unwrap(), id);
}

#[tokio::test]
async fn empty_collection_returns_no_content() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/api/v1/material").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let app = TestApp::new().await;
    seed_material(&app, "Rebar 12mm", None).await;

    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/v1/material",
            &[
                ("name", "Rebar 12mm"),
                ("description", "another batch"),
                ("category", "material"),
                ("unit", "unit"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn duplicate_barcode_is_rejected() {
    let app = TestApp::new().await;
    seed_material(&app, "Hammer", Some("111222333")).await;

    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/v1/material",
            &[
                ("name", "Sledgehammer"),
                ("description", "heavy duty"),
                ("category", "tool"),
                ("unit", "unit"),
                ("barcode", "111222333"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn barcode_update_rules() {
    let app = TestApp::new().await;
    let first = seed_material(&app, "Paint bucket", Some("900100200")).await;
    seed_material(&app, "Thinner", Some("900100201")).await;

    // Updating to a barcode held by a different material fails.
    let (status, _) = app
        .multipart(
            Method::PUT,
            &format!("/api/v1/material/{first}"),
            &[
                ("name", "Paint bucket"),
                ("description", "Paint bucket for testing"),
                ("category", "material"),
                ("unit", "gallon"),
                ("barcode", "900100201"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Re-submitting its own barcode succeeds.
    let (status, body) = app
        .multipart(
            Method::PUT,
            &format!("/api/v1/material/{first}"),
            &[
                ("name", "Paint bucket"),
                ("description", "Paint bucket for testing"),
                ("category", "material"),
                ("unit", "gallon"),
                ("barcode", "900100200"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::OK, "own barcode should be accepted: {body}");
    assert_eq!(body["data"]["unit"], "gallon");
}

#[tokio::test]
async fn validation_failures_are_bad_requests() {
    let app = TestApp::new().await;

    // Name too short.
    let (status, _) = app
        .multipart(
            Method::POST,
            "/api/v1/material",
            &[
                ("name", "x"),
                ("description", "valid description"),
                ("category", "material"),
                ("unit", "bag"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown unit.
    let (status, body) = app
        .multipart(
            Method::POST,
            "/api/v1/material",
            &[
                ("name", "Gravel"),
                ("description", "crushed stone"),
                ("category", "material"),
                ("unit", "furlong"),
            ],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn deleting_nonexistent_material_is_not_found() {
    let app = TestApp::new().await;
    let (status, body) = app
        .delete("/api/v1/material/00000000-0000-0000-0000-000000000099")
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn deleting_referenced_material_is_refused() {
    let app = TestApp::new().await;
    let material_id = seed_material(&app, "Cement", None).await;
    let warehouse_id = seed_warehouse(&app, "Central depot").await;
    common::seed_entry(&app, &material_id, &warehouse_id, 10).await;

    let (status, _) = app.delete(&format!("/api/v1/material/{material_id}")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Still present afterwards.
    let (status, _) = app.get(&format!("/api/v1/material/{material_id}")).await;
    assert_eq!(status, StatusCode::OK);
}
