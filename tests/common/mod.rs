#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;
use worksite_api::{
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};

/// Test harness: the full application router over a throwaway SQLite
/// database, one per test.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _tmp: TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let db_path = tmp.path().join("worksite_test.db");
        let upload_dir = tmp.path().join("uploads");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1",
            0,
        );
        cfg.environment = "test".to_string();
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        cfg.upload_dir = upload_dir.display().to_string();

        let pool = db::establish_connection(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations");
        let db_arc = Arc::new(pool);

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), event_sender.clone(), &cfg);
        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };
        let router = worksite_api::build_router(state.clone());

        Self {
            router,
            state,
            _tmp: tmp,
            _event_task: event_task,
        }
    }

    /// Drive one request through the router and decode the JSON body (if
    /// any).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    pub async fn delete_with_body(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(body)).await
    }

    /// Send a `multipart/form-data` request built from plain text fields.
    pub async fn multipart(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> (StatusCode, Value) {
        let boundary = "----worksite-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("request failed");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }
}

/// Shorthand: create a material through the API and return its id.
#[allow(dead_code)]
pub async fn seed_material(app: &TestApp, name: &str, barcode: Option<&str>) -> String {
    let mut fields = vec![
        ("name", name.to_string()),
        ("description", format!("{} for testing", name)),
        ("category", "material".to_string()),
        ("unit", "bag".to_string()),
    ];
    if let Some(code) = barcode {
        fields.push(("barcode", code.to_string()));
    }
    let borrowed: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let (status, body) = app
        .multipart(Method::POST, "/api/v1/material", &borrowed)
        .await;
    assert_eq!(status, StatusCode::CREATED, "material create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Shorthand: create a warehouse through the API and return its id.
#[allow(dead_code)]
pub async fn seed_warehouse(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .post(
            "/api/v1/warehouses",
            serde_json::json!({
                "name": name,
                "location": "Industrial park, lot 14",
                "phone": "+56912345678"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "warehouse create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}

/// Shorthand: register stock and return the inventory entry id.
#[allow(dead_code)]
pub async fn seed_entry(
    app: &TestApp,
    material_id: &str,
    warehouse_id: &str,
    quantity: i32,
) -> String {
    let (status, body) = app
        .post(
            "/api/v1/inventory",
            serde_json::json!({
                "material_id": material_id,
                "warehouse_id": warehouse_id,
                "quantity": quantity,
                "entered_by": "tester@worksite.example"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "inventory create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
