use crate::{
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Chilean RUT shape: 7-8 digits, dash, check digit (digit or K).
static RUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7,8}-[\dkK]$").unwrap());

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckRequest {
    #[validate(regex(path = "RUT_RE", message = "rut must look like 12345678-9"))]
    pub rut: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RangeQuery {
    #[validate(regex(path = "RUT_RE", message = "rut must look like 12345678-9"))]
    pub rut: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(check_in))
        .route("/check-out", post(check_out))
        .route("/last/:rut", get(last))
        .route("/records", get(records))
        .route("/report", get(report))
}

/// Open an attendance record for the worker
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body = CheckRequest,
    responses(
        (status = 201, description = "Check-in registered"),
        (status = 404, description = "Unknown RUT", body = crate::errors::ErrorBody),
        (status = 409, description = "Worker already checked in", body = crate::errors::ErrorBody)
    ),
    tag = "attendance"
)]
pub async fn check_in(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let record = state.services.attendance.check_in(&req.rut).await?;
    Ok(created(record))
}

/// Close the worker's open attendance record
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Check-out registered"),
        (status = 404, description = "No open record for that RUT", body = crate::errors::ErrorBody)
    ),
    tag = "attendance"
)]
pub async fn check_out(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let record = state.services.attendance.check_out(&req.rut).await?;
    Ok(success(record))
}

pub async fn last(
    State(state): State<AppState>,
    Path(rut): Path<String>,
) -> Result<Response, ServiceError> {
    let record = state.services.attendance.last(&rut).await?;
    Ok(success(record))
}

pub async fn records(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, ServiceError> {
    validate_input(&query)?;
    let records = state
        .services
        .attendance
        .records(&query.rut, query.start, query.end)
        .await?;
    Ok(collection(records))
}

/// Gap-filled report over an inclusive date range: every calendar day,
/// absences counted, worked hours summed
#[utoipa::path(
    get,
    path = "/api/v1/attendance/report",
    params(
        ("rut" = String, Query, description = "Worker RUT"),
        ("start" = String, Query, description = "Range start, YYYY-MM-DD"),
        ("end" = String, Query, description = "Range end, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Report returned"),
        (status = 400, description = "Invalid range", body = crate::errors::ErrorBody)
    ),
    tag = "attendance"
)]
pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Response, ServiceError> {
    validate_input(&query)?;
    let report = state
        .services
        .attendance
        .report(&query.rut, query.start, query.end)
        .await?;
    Ok(success(report))
}
