use crate::{
    entities::{inventory_adjustment, material, warehouse},
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::inventory::DetailedEntry,
    AppState,
};
use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialRef {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub unit: String,
}

impl From<material::Model> for MaterialRef {
    fn from(m: material::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            category: m.category,
            unit: m.unit,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WarehouseRef {
    pub id: Uuid,
    pub name: String,
    pub location: String,
}

impl From<warehouse::Model> for WarehouseRef {
    fn from(w: warehouse::Model) -> Self {
        Self {
            id: w.id,
            name: w.name,
            location: w.location,
        }
    }
}

/// An inventory entry with its material and warehouse joined in, the way
/// the stock list renders it.
#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryEntryResponse {
    pub id: Uuid,
    pub quantity: i32,
    pub entered_by: String,
    pub entered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub material: Option<MaterialRef>,
    pub warehouse: Option<WarehouseRef>,
}

impl From<DetailedEntry> for InventoryEntryResponse {
    fn from((entry, material, warehouse): DetailedEntry) -> Self {
        Self {
            id: entry.id,
            quantity: entry.quantity,
            entered_by: entry.entered_by,
            entered_at: entry.entered_at,
            updated_at: entry.updated_at,
            material: material.map(MaterialRef::from),
            warehouse: warehouse.map(WarehouseRef::from),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdjustmentResponse {
    pub id: Uuid,
    pub delta: i32,
    pub quantity_after: i32,
    pub adjusted_by: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<inventory_adjustment::Model> for AdjustmentResponse {
    fn from(a: inventory_adjustment::Model) -> Self {
        Self {
            id: a.id,
            delta: a.delta,
            quantity_after: a.quantity_after,
            adjusted_by: a.adjusted_by,
            reason: a.reason,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEntryRequest {
    pub material_id: Uuid,
    pub warehouse_id: Uuid,
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i32,
    #[validate(length(min = 1, message = "entered_by must not be empty"))]
    pub entered_by: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdjustRequest {
    /// Positive to add stock, negative to remove it.
    pub delta: i32,
    #[validate(length(min = 1, message = "adjusted_by must not be empty"))]
    pub adjusted_by: String,
    #[validate(length(max = 200, message = "reason must be at most 200 characters"))]
    pub reason: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_entries).post(create_entry))
        .route("/:id", get(get_entry).delete(delete_entry))
        .route("/:id/adjust", post(adjust_entry))
        .route("/:id/adjustments", get(list_adjustments))
}

/// List all stock entries with material and warehouse context
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses(
        (status = 200, description = "Inventory returned"),
        (status = 204, description = "No inventory registered")
    ),
    tag = "inventory"
)]
pub async fn list_entries(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let entries = state.services.inventory.list().await?;
    Ok(collection(
        entries
            .into_iter()
            .map(InventoryEntryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory entry id")),
    responses(
        (status = 200, description = "Entry returned"),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorBody)
    ),
    tag = "inventory"
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let entry = state.services.inventory.get(id).await?;
    Ok(success(InventoryEntryResponse::from(entry)))
}

/// Register stock of a material at a warehouse
#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created"),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorBody),
        (status = 404, description = "Material or warehouse not found", body = crate::errors::ErrorBody)
    ),
    tag = "inventory"
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Json(req): Json<CreateEntryRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let entry = state
        .services
        .inventory
        .create(req.material_id, req.warehouse_id, req.quantity, req.entered_by)
        .await?;
    Ok(created(entry))
}

/// Apply a signed delta to an entry's on-hand quantity
#[utoipa::path(
    post,
    path = "/api/v1/inventory/{id}/adjust",
    params(("id" = Uuid, Path, description = "Inventory entry id")),
    request_body = AdjustRequest,
    responses(
        (status = 200, description = "Quantity adjusted"),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorBody),
        (status = 422, description = "Removal would overdraw the entry", body = crate::errors::ErrorBody)
    ),
    tag = "inventory"
)]
pub async fn adjust_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AdjustRequest>,
) -> Result<Response, ServiceError> {
    validate_input(&req)?;
    let entry = state
        .services
        .inventory
        .adjust(id, req.delta, req.adjusted_by, req.reason)
        .await?;
    Ok(success(entry))
}

/// The audit trail of an entry, newest first
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}/adjustments",
    params(("id" = Uuid, Path, description = "Inventory entry id")),
    responses(
        (status = 200, description = "Adjustments returned"),
        (status = 204, description = "No adjustments recorded"),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorBody)
    ),
    tag = "inventory"
)]
pub async fn list_adjustments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let adjustments = state.services.inventory.adjustments(id).await?;
    Ok(collection(
        adjustments
            .into_iter()
            .map(AdjustmentResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/inventory/{id}",
    params(("id" = Uuid, Path, description = "Inventory entry id")),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "Entry not found", body = crate::errors::ErrorBody),
        (status = 409, description = "Entry still referenced by assignments", body = crate::errors::ErrorBody)
    ),
    tag = "inventory"
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let entry = state.services.inventory.delete(id).await?;
    Ok(success(entry))
}
