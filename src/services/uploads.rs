use crate::errors::ServiceError;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use uuid::Uuid;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Persists uploaded images under the configured directory and hands back
/// the relative URL they are served from.
#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(upload_dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_bytes,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Store one image. The stored name is a fresh UUID with the original
    /// extension, so uploads never collide or overwrite each other.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn store_image(
        &self,
        original_name: &str,
        data: &[u8],
    ) -> Result<String, ServiceError> {
        if data.is_empty() {
            return Err(ServiceError::UploadError("uploaded file is empty".into()));
        }
        if data.len() > self.max_bytes {
            return Err(ServiceError::UploadError(format!(
                "file exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .ok_or_else(|| {
                ServiceError::UploadError("file name carries no extension".into())
            })?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ServiceError::UploadError(format!(
                "unsupported image type \".{}\" (expected one of: {})",
                extension,
                ALLOWED_EXTENSIONS.join(", ")
            )));
        }

        tokio::fs::create_dir_all(&self.upload_dir).await?;
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.upload_dir.join(&file_name);
        tokio::fs::write(&path, data).await?;

        info!(file = %file_name, "image stored");
        Ok(format!("/uploads/{}", file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_names_by_uuid() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path(), 1024);
        let url = service.store_image("photo.PNG", b"fake-png").await.unwrap();
        assert!(url.starts_with("/uploads/"));
        assert!(url.ends_with(".png"));

        let stored = dir.path().join(url.trim_start_matches("/uploads/"));
        assert_eq!(std::fs::read(stored).unwrap(), b"fake-png");
    }

    #[tokio::test]
    async fn rejects_unknown_extension_and_oversize() {
        let dir = tempfile::tempdir().unwrap();
        let service = UploadService::new(dir.path(), 4);
        assert!(matches!(
            service.store_image("malware.exe", b"xx").await,
            Err(ServiceError::UploadError(_))
        ));
        assert!(matches!(
            service.store_image("big.png", b"too-big").await,
            Err(ServiceError::UploadError(_))
        ));
    }
}
