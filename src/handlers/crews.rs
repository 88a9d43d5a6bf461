use crate::{
    entities::crew_assignment::{self, CrewStatus},
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct CrewAssignmentResponse {
    pub id: Uuid,
    pub project_id: Uuid,
    pub participants: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crew_assignment::Model> for CrewAssignmentResponse {
    fn from(model: crew_assignment::Model) -> Self {
        let participants = model.participant_list();
        Self {
            id: model.id,
            project_id: model.project_id,
            participants,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCrewRequest {
    pub project_id: Uuid,
    #[validate(length(min = 1, message = "at least one participant is required"))]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ParticipantsRequest {
    #[validate(length(min = 1, message = "at least one participant is required"))]
    pub participants: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusRequest {
    /// assigned, in_progress, or completed
    pub status: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_crews).post(create_crew))
        .route("/:id", get(get_crew).delete(delete_crew))
        .route("/:id/participants", put(update_participants))
        .route("/:id/status", put(set_status))
}

pub async fn list_crews(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let crews = state.services.crews.list().await?;
    Ok(collection(
        crews
            .into_iter()
            .map(CrewAssignmentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_crew(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let crew = state.services.crews.get(id).await?;
    Ok(success(CrewAssignmentResponse::from(crew)))
}

pub async fn create_crew(
    State(state): State<AppState>,
    Json(req): Json<CreateCrewRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let crew = state
        .services
        .crews
        .create(req.project_id, req.participants)
        .await?;
    Ok(created(CrewAssignmentResponse::from(crew)))
}

pub async fn update_participants(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ParticipantsRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let crew = state
        .services
        .crews
        .update_participants(id, req.participants)
        .await?;
    Ok(success(CrewAssignmentResponse::from(crew)))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Response, ServiceError> {
    let status = CrewStatus::from_str(&req.status).map_err(|_| {
        ServiceError::ValidationError(format!(
            "status: \"{}\" is not one of assigned, in_progress, completed",
            req.status
        ))
    })?;
    let crew = state.services.crews.set_status(id, status).await?;
    Ok(success(CrewAssignmentResponse::from(crew)))
}

pub async fn delete_crew(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    state.services.crews.delete(id).await?;
    Ok(success(serde_json::json!({ "id": id })))
}
