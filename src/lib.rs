//! worksite-api
//!
//! REST backend for a construction-company ERP: material registry,
//! warehouse inventory ledger, projects, crew assignment, attendance
//! tracking, an internal forum, and personnel records.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::ToSchema;

/// Shared application state carried by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub services: handlers::AppServices,
}

/// Success envelope: `{"status":"success","data":...}`. The error
/// counterpart lives in [`errors::ErrorBody`].
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(example = "success")]
    pub status: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

/// All versioned API routes.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/material", handlers::materials::router())
        .nest("/warehouses", handlers::warehouses::router())
        .nest("/inventory", handlers::inventory::router())
        .nest("/projects", handlers::projects::router())
        .nest("/assignments", handlers::assignments::router())
        .nest("/crews", handlers::crews::router())
        .nest("/attendance", handlers::attendance::router())
        .nest("/forum", handlers::forum::router())
        .nest("/users", handlers::users::router())
        .nest("/uploads", handlers::uploads::router())
}

/// Assemble the full application router: liveness, versioned API, static
/// uploads mount, Swagger UI, and request tracing. The binary layers CORS
/// and timeouts on top.
pub fn build_router(state: AppState) -> Router {
    let uploads_dir = state.config.upload_dir.clone();
    // Leave headroom over the configured file limit for the multipart framing.
    let body_limit = state.config.max_upload_bytes + 64 * 1024;
    Router::new()
        .route("/", get(|| async { "worksite-api up" }))
        .route("/health", get(handlers::health::health))
        .nest("/api/v1", api_v1_routes())
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .merge(openapi::swagger_ui())
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
