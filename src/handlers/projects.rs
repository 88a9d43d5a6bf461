use crate::{
    entities::project::{self, Activity},
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::projects::ProjectDraft,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub contracting_company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: i64,
    pub activities: Vec<Activity>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<project::Model> for ProjectResponse {
    fn from(model: project::Model) -> Self {
        let activities = model.activity_list();
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            contracting_company: model.contracting_company,
            start_date: model.start_date,
            end_date: model.end_date,
            budget: model.budget,
            activities,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProjectRequest {
    #[validate(length(min = 2, max = 70, message = "title must be 2 to 70 characters"))]
    pub title: String,
    #[validate(length(min = 2, max = 600, message = "description must be 2 to 600 characters"))]
    pub description: String,
    #[validate(length(
        min = 2,
        max = 600,
        message = "contracting_company must be 2 to 600 characters"
    ))]
    pub contracting_company: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1, max = 999_999_999, message = "budget must be 1 to 999999999"))]
    pub budget: i64,
    #[serde(default)]
    pub activities: Vec<ActivityRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ActivityRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1 to 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 400, message = "description must be at most 400 characters"))]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub done: bool,
}

impl From<ActivityRequest> for Activity {
    fn from(req: ActivityRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            done: req.done,
        }
    }
}

impl ProjectRequest {
    fn into_draft(self) -> Result<ProjectDraft, ServiceError> {
        for activity in &self.activities {
            activity.validate().map_err(ServiceError::from)?;
        }
        Ok(ProjectDraft {
            title: self.title,
            description: self.description,
            contracting_company: self.contracting_company,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            activities: self.activities.into_iter().map(Activity::from).collect(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivityStatusRequest {
    pub done: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route(
            "/:id",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/:id/activities", post(add_activity))
        .route("/:id/activities/:index/status", put(set_activity_status))
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let projects = state.services.projects.list().await?;
    Ok(collection(
        projects
            .into_iter()
            .map(ProjectResponse::from)
            .collect::<Vec<_>>(),
    ))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let project = state.services.projects.get(id).await?;
    Ok(success(ProjectResponse::from(project)))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<ProjectRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let project = state.services.projects.create(req.into_draft()?).await?;
    Ok(created(ProjectResponse::from(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let project = state.services.projects.update(id, req.into_draft()?).await?;
    Ok(success(ProjectResponse::from(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    state.services.projects.delete(id).await?;
    Ok(success(serde_json::json!({ "id": id })))
}

pub async fn add_activity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActivityRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let project = state
        .services
        .projects
        .add_activity(id, Activity::from(req))
        .await?;
    Ok(created(ProjectResponse::from(project)))
}

pub async fn set_activity_status(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(req): Json<ActivityStatusRequest>,
) -> Result<Response, ServiceError> {
    let project = state
        .services
        .projects
        .set_activity_done(id, index, req.done)
        .await?;
    Ok(success(ProjectResponse::from(project)))
}
