use crate::{
    entities::material::{self, MaterialCategory, UnitOfMeasure},
    errors::ServiceError,
    handlers::common::{collection, created, success, validate_input},
    services::materials::MaterialDraft,
    AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "id": "550e8400-e29b-41d4-a716-446655440000",
    "name": "Portland cement",
    "description": "25kg bag, general purpose",
    "category": "material",
    "unit": "bag",
    "barcode": "779052100423",
    "image_url": "/uploads/2e9c2a8e-3f41-4a44-a57e-6f51a1b7a6d1.jpg",
    "created_at": "2024-05-10T12:00:00Z",
    "updated_at": "2024-05-10T12:00:00Z"
}))]
pub struct MaterialResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[schema(example = "material")]
    pub category: String,
    #[schema(example = "bag")]
    pub unit: String,
    pub barcode: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<material::Model> for MaterialResponse {
    fn from(model: material::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            category: model.category,
            unit: model.unit,
            barcode: model.barcode,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Text fields of the multipart material form, validated before the image
/// is touched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MaterialPayload {
    #[validate(length(min = 2, max = 100, message = "name must be 2 to 100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 400, message = "description must be 2 to 400 characters"))]
    pub description: String,
    /// "material" or "tool"
    pub category: String,
    /// One of the supported units of measure, e.g. "bag", "kg", "cubic-meter"
    pub unit: String,
    #[validate(length(max = 100, message = "barcode must be at most 100 characters"))]
    pub barcode: Option<String>,
}

impl MaterialPayload {
    fn into_draft(self) -> Result<MaterialDraft, ServiceError> {
        let category = MaterialCategory::from_str(&self.category).map_err(|_| {
            ServiceError::ValidationError(format!(
                "category: \"{}\" is not one of material, tool",
                self.category
            ))
        })?;
        let unit = UnitOfMeasure::from_str(&self.unit).map_err(|_| {
            ServiceError::ValidationError(format!(
                "unit: \"{}\" is not a supported unit of measure",
                self.unit
            ))
        })?;
        Ok(MaterialDraft {
            name: self.name,
            description: self.description,
            category,
            unit,
            barcode: self.barcode,
        })
    }
}

#[derive(Default)]
struct MaterialForm {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    unit: Option<String>,
    barcode: Option<String>,
    image: Option<(String, Vec<u8>)>,
}

impl MaterialForm {
    /// Drain a `multipart/form-data` body. Unknown fields are ignored.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ServiceError> {
        let mut form = Self::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServiceError::ValidationError(format!("malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let file_name = field.file_name().unwrap_or("image").to_string();
                    let data = field.bytes().await.map_err(|e| {
                        ServiceError::ValidationError(format!("failed reading image field: {}", e))
                    })?;
                    if !data.is_empty() {
                        form.image = Some((file_name, data.to_vec()));
                    }
                }
                other => {
                    let value = field.text().await.map_err(|e| {
                        ServiceError::ValidationError(format!(
                            "failed reading field {}: {}",
                            other, e
                        ))
                    })?;
                    match other {
                        "name" => form.name = Some(value),
                        "description" => form.description = Some(value),
                        "category" => form.category = Some(value),
                        "unit" => form.unit = Some(value),
                        "barcode" => {
                            form.barcode = Some(value).filter(|v| !v.is_empty());
                        }
                        _ => {}
                    }
                }
            }
        }
        Ok(form)
    }

    fn payload(&self) -> Result<MaterialPayload, ServiceError> {
        let require = |field: &Option<String>, name: &str| {
            field.clone().ok_or_else(|| {
                ServiceError::ValidationError(format!("{}: field is required", name))
            })
        };
        Ok(MaterialPayload {
            name: require(&self.name, "name")?,
            description: require(&self.description, "description")?,
            category: require(&self.category, "category")?,
            unit: require(&self.unit, "unit")?,
            barcode: self.barcode.clone(),
        })
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route(
            "/:id",
            get(get_material).put(update_material).delete(delete_material),
        )
        .route("/codigoBarra/:code", get(get_material_by_barcode))
}

/// List every registered material
#[utoipa::path(
    get,
    path = "/api/v1/material",
    responses(
        (status = 200, description = "Materials returned"),
        (status = 204, description = "No materials registered"),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn list_materials(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let materials = state.services.materials.list().await?;
    Ok(collection(
        materials
            .into_iter()
            .map(MaterialResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Fetch one material by id
#[utoipa::path(
    get,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material returned"),
        (status = 404, description = "Material not found", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn get_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let material = state.services.materials.get(id).await?;
    Ok(success(MaterialResponse::from(material)))
}

/// Fetch one material by barcode
#[utoipa::path(
    get,
    path = "/api/v1/material/codigoBarra/{code}",
    params(("code" = String, Path, description = "Barcode")),
    responses(
        (status = 200, description = "Material returned"),
        (status = 404, description = "No material with that barcode", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn get_material_by_barcode(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ServiceError> {
    let material = state.services.materials.get_by_barcode(&code).await?;
    Ok(success(MaterialResponse::from(material)))
}

/// Register a material (multipart, optional `image` file field)
#[utoipa::path(
    post,
    path = "/api/v1/material",
    request_body(content = MaterialPayload, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Material created"),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorBody),
        (status = 409, description = "Duplicate name or barcode", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn create_material(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ServiceError> {
    let form = MaterialForm::from_multipart(multipart).await?;
    let payload = form.payload()?;
    validate_input(&payload)?;
    let draft = payload.into_draft()?;

    let image_url = match &form.image {
        Some((file_name, data)) => Some(state.services.uploads.store_image(file_name, data).await?),
        None => None,
    };

    let material = state.services.materials.create(draft, image_url).await?;
    Ok(created(MaterialResponse::from(material)))
}

/// Update a material in place. Omitting the `image` field keeps the stored
/// image; supplying one replaces it.
#[utoipa::path(
    put,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    request_body(content = MaterialPayload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Material updated"),
        (status = 400, description = "Validation failure", body = crate::errors::ErrorBody),
        (status = 404, description = "Material not found", body = crate::errors::ErrorBody),
        (status = 409, description = "Duplicate name or barcode", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn update_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Response, ServiceError> {
    let form = MaterialForm::from_multipart(multipart).await?;
    let payload = form.payload()?;
    validate_input(&payload)?;
    let draft = payload.into_draft()?;

    let image_url = match &form.image {
        Some((file_name, data)) => Some(state.services.uploads.store_image(file_name, data).await?),
        None => None,
    };

    let material = state.services.materials.update(id, draft, image_url).await?;
    Ok(success(MaterialResponse::from(material)))
}

/// Delete a material that no inventory entry references
#[utoipa::path(
    delete,
    path = "/api/v1/material/{id}",
    params(("id" = Uuid, Path, description = "Material id")),
    responses(
        (status = 200, description = "Material deleted"),
        (status = 404, description = "Material not found", body = crate::errors::ErrorBody),
        (status = 409, description = "Material still referenced by inventory", body = crate::errors::ErrorBody)
    ),
    tag = "materials"
)]
pub async fn delete_material(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ServiceError> {
    let material = state.services.materials.delete(id).await?;
    Ok(success(MaterialResponse::from(material)))
}
