mod common;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use common::TestApp;
use sea_orm::{ActiveModelTrait, Set};
use serde_json::json;
use uuid::Uuid;
use worksite_api::entities::attendance_record;

async fn seed_user(app: &TestApp, rut: &str) {
    let (status, body) = app
        .post(
            "/api/v1/users",
            json!({
                "username": "pedro",
                "rut": rut,
                "email": "pedro@worksite.example",
                "roles": ["worker"]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "user create failed: {body}");
}

#[tokio::test]
async fn check_in_and_out_flow() {
    let app = TestApp::new().await;
    seed_user(&app, "12345678-9").await;

    let (status, body) = app
        .post("/api/v1/attendance/check-in", json!({ "rut": "12345678-9" }))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    // Checking in twice without a check-out is a conflict.
    let (status, _) = app
        .post("/api/v1/attendance/check-in", json!({ "rut": "12345678-9" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = app
        .post("/api/v1/attendance/check-out", json!({ "rut": "12345678-9" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["check_out"].is_string());

    let (status, body) = app.get("/api/v1/attendance/last/12345678-9").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["check_out"].is_string());
}

#[tokio::test]
async fn unknown_rut_cannot_check_in() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/api/v1/attendance/check-in", json!({ "rut": "99999999-9" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_rut_is_a_validation_error() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post("/api/v1/attendance/check-in", json!({ "rut": "not-a-rut" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn report_gap_fills_the_inclusive_range() {
    let app = TestApp::new().await;
    seed_user(&app, "11111111-1").await;

    // One record on the middle day of a three-day window.
    let check_in = Utc.with_ymd_and_hms(2024, 1, 2, 8, 0, 0).unwrap();
    attendance_record::ActiveModel {
        id: Set(Uuid::new_v4()),
        rut: Set("11111111-1".to_string()),
        check_in: Set(check_in),
        check_out: Set(Some(Utc.with_ymd_and_hms(2024, 1, 2, 17, 0, 0).unwrap())),
        created_at: Set(check_in),
    }
    .insert(app.state.db.as_ref())
    .await
    .expect("failed to seed attendance record");

    let (status, body) = app
        .get("/api/v1/attendance/report?rut=11111111-1&start=2024-01-01&end=2024-01-03")
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let report = &body["data"];
    let days = report["days"].as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["absent"], true);
    assert_eq!(days[1]["absent"], false);
    assert_eq!(days[2]["absent"], true);
    assert_eq!(report["absences"], 2);
    assert!((report["worked_hours"].as_f64().unwrap() - 9.0).abs() < 1e-9);
}

#[tokio::test]
async fn report_with_inverted_range_is_rejected() {
    let app = TestApp::new().await;
    seed_user(&app, "22222222-2").await;

    let (status, _) = app
        .get("/api/v1/attendance/report?rut=22222222-2&start=2024-02-10&end=2024-02-01")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
