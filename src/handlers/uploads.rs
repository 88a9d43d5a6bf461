use crate::{
    errors::ServiceError,
    handlers::common::created,
    AppState,
};
use axum::{
    extract::{Multipart, State},
    response::Response,
    routing::post,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    /// Relative URL the file is served from, e.g. `/uploads/<name>.png`.
    pub image_url: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload_image))
}

/// Store one image from the multipart `image` field and return its URL.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::ValidationError(format!("malformed multipart body: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("image").to_string();
        let data = field.bytes().await.map_err(|e| {
            ServiceError::ValidationError(format!("failed reading image field: {}", e))
        })?;
        let image_url = state.services.uploads.store_image(&file_name, &data).await?;
        return Ok(created(UploadResponse { image_url }));
    }
    Err(ServiceError::ValidationError(
        "multipart field \"image\" is required".into(),
    ))
}
