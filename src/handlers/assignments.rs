use crate::{
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    handlers::inventory::{MaterialRef, WarehouseRef},
    services::assignments::{AssignmentLineDraft, DetailedLine},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentLineResponse {
    pub id: Uuid,
    pub inventory_entry_id: Uuid,
    pub quantity_assigned: i32,
    /// On-hand quantity remaining at the source entry.
    pub quantity_on_hand: Option<i32>,
    pub material: Option<MaterialRef>,
    pub warehouse: Option<WarehouseRef>,
}

impl From<DetailedLine> for AssignmentLineResponse {
    fn from((line, entry, material, warehouse): DetailedLine) -> Self {
        Self {
            id: line.id,
            inventory_entry_id: line.inventory_entry_id,
            quantity_assigned: line.quantity_assigned,
            quantity_on_hand: entry.map(|e| e.quantity),
            material: material.map(MaterialRef::from),
            warehouse: warehouse.map(WarehouseRef::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<AssignmentLineResponse>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AssignRequest {
    pub project_id: Uuid,
    #[validate(length(min = 1, message = "at least one line is required"))]
    pub lines: Vec<AssignLineRequest>,
    #[validate(length(min = 1, message = "assigned_by must not be empty"))]
    pub assigned_by: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AssignLineRequest {
    pub inventory_entry_id: Uuid,
    /// Deducted from the source entry; must be positive and at most the
    /// on-hand quantity.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReturnedByRequest {
    #[validate(length(min = 1, message = "returned_by must not be empty"))]
    pub returned_by: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_assignments).post(create_assignment))
        .route("/:id", get(get_assignment).delete(delete_assignment))
        .route("/:id/lines/:line_id", axum::routing::delete(unassign_line))
}

pub async fn list_assignments(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let assignments = state.services.assignments.list().await?;
    Ok(collection(
        assignments
            .into_iter()
            .map(|a| AssignmentResponse {
                id: a.id,
                project_id: a.project_id,
                created_at: a.created_at,
                lines: None,
            })
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let (assignment, lines) = state.services.assignments.get(id).await?;
    Ok(success(AssignmentResponse {
        id: assignment.id,
        project_id: assignment.project_id,
        created_at: assignment.created_at,
        lines: Some(lines.into_iter().map(AssignmentLineResponse::from).collect()),
    }))
}

/// Assign inventory lines to a project; the whole batch is atomic.
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(req): Json<AssignRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let lines = req
        .lines
        .into_iter()
        .map(|l| AssignmentLineDraft {
            inventory_entry_id: l.inventory_entry_id,
            quantity: l.quantity,
        })
        .collect();
    let assignment = state
        .services
        .assignments
        .assign(req.project_id, lines, req.assigned_by)
        .await?;
    Ok(created(AssignmentResponse {
        id: assignment.id,
        project_id: assignment.project_id,
        created_at: assignment.created_at,
        lines: None,
    }))
}

/// Return one line's quantity to its source entry and drop the line.
pub async fn unassign_line(
    State(state): State<AppState>,
    Path((id, line_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<ReturnedByRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    state
        .services
        .assignments
        .unassign(id, line_id, req.returned_by)
        .await?;
    Ok(success(serde_json::json!({ "id": id, "line_id": line_id })))
}

/// Delete a whole assignment, returning all of its stock first.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ReturnedByRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    state.services.assignments.delete(id, req.returned_by).await?;
    Ok(success(serde_json::json!({ "id": id })))
}
