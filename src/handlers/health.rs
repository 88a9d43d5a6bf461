use crate::{errors::ServiceError, handlers::common::success, AppState};
use axum::{extract::State, response::Response};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub service: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database ping.
pub async fn health(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let db_status = match state
        .db
        .execute(Statement::from_string(
            state.db.get_database_backend(),
            "SELECT 1".to_string(),
        ))
        .await
    {
        Ok(_) => "up",
        Err(_) => "down",
    };

    Ok(success(HealthStatus {
        service: "up",
        database: db_status,
    }))
}
