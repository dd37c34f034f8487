use crate::domain::image::{
    ImageError, ImageRepository, ImageUpload, RepositoryError, StoredImage, StoredNameGenerator,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Invalid(#[from] ImageError),
    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

/// 検証済みのアップロードを新しい名前で保存する
pub struct UploadImageUseCase {
    repository: Arc<dyn ImageRepository>,
    names: StoredNameGenerator,
}

impl UploadImageUseCase {
    pub fn new(repository: Arc<dyn ImageRepository>) -> Self {
        Self {
            repository,
            names: StoredNameGenerator::new(),
        }
    }

    pub async fn execute(&self, upload: ImageUpload) -> Result<StoredImage, UploadError> {
        let name = self.names.next(&upload.original_name, &upload.content_type);
        info!(
            original = %upload.original_name,
            content_type = %upload.content_type,
            size = upload.size(),
            stored_as = %name,
            "Accepting upload"
        );

        let stored = self.repository.save(&name, &upload.bytes).await?;
        Ok(stored)
    }
}
