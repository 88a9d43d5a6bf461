use crate::{
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::warehouses::WarehouseDraft,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct WarehouseRequest {
    #[validate(length(min = 2, max = 100, message = "name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 200, message = "location must be 2 to 200 characters"))]
    pub location: String,
    #[validate(length(min = 7, max = 20, message = "phone must be 7 to 20 characters"))]
    pub phone: String,
}

impl From<WarehouseRequest> for WarehouseDraft {
    fn from(req: WarehouseRequest) -> Self {
        Self {
            name: req.name,
            location: req.location,
            phone: req.phone,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse).put(update_warehouse).delete(delete_warehouse),
        )
}

pub async fn list_warehouses(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let warehouses = state.services.warehouses.list().await?;
    Ok(collection(warehouses))
}

pub async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let warehouse = state.services.warehouses.get(id).await?;
    Ok(success(warehouse))
}

pub async fn create_warehouse(
    State(state): State<AppState>,
    Json(req): Json<WarehouseRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let warehouse = state.services.warehouses.create(req.into()).await?;
    Ok(created(warehouse))
}

pub async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<WarehouseRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let warehouse = state.services.warehouses.update(id, req.into()).await?;
    Ok(success(warehouse))
}

pub async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let warehouse = state.services.warehouses.delete(id).await?;
    Ok(success(warehouse))
}
