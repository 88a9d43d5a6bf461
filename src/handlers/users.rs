use crate::{
    entities::user,
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::users::UserDraft,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

static RUT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{7,8}-[\dkK]$").unwrap());

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub rut: String,
    pub email: String,
    pub roles: Vec<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(model: user::Model) -> Self {
        let roles = model.role_list();
        Self {
            id: model.id,
            username: model.username,
            rut: model.rut,
            email: model.email,
            roles,
            photo_url: model.photo_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserRequest {
    #[validate(length(min = 2, max = 100, message = "username must be 2 to 100 characters"))]
    pub username: String,
    #[validate(regex(path = "RUT_RE", message = "rut must look like 12345678-9"))]
    pub rut: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub photo_url: Option<String>,
}

impl From<UserRequest> for UserDraft {
    fn from(req: UserRequest) -> Self {
        Self {
            username: req.username,
            rut: req.rut,
            email: req.email,
            roles: req.roles,
            photo_url: req.photo_url,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/rut/:rut", get(get_user_by_rut))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let users = state.services.users.list().await?;
    Ok(collection(
        users.into_iter().map(UserResponse::from).collect::<Vec<_>>(),
    ))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.get(id).await?;
    Ok(success(UserResponse::from(user)))
}

pub async fn get_user_by_rut(
    State(state): State<AppState>,
    Path(rut): Path<String>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.get_by_rut(&rut).await?;
    Ok(success(UserResponse::from(user)))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<UserRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let user = state.services.users.create(req.into()).await?;
    Ok(created(UserResponse::from(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UserRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let user = state.services.users.update(id, req.into()).await?;
    Ok(success(UserResponse::from(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let user = state.services.users.delete(id).await?;
    Ok(success(UserResponse::from(user)))
}
