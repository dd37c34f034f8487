use crate::domain::image::{ImageExtension, ImageRepository, RepositoryError};
use std::sync::Arc;
use tracing::debug;

/// 保存ルート内の画像ファイル一覧（古い順）
pub struct ListImagesUseCase {
    repository: Arc<dyn ImageRepository>,
}

impl ListImagesUseCase {
    pub fn new(repository: Arc<dyn ImageRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<String>, RepositoryError> {
        let entries = self.repository.list_entries().await?;
        let total = entries.len();

        let mut files: Vec<String> = entries
            .into_iter()
            .filter(|name| ImageExtension::is_listable(name))
            .collect();
        // タイムスタンプ接頭辞により辞書順 = 時系列順
        files.sort();

        debug!("Listing {} of {} entries", files.len(), total);
        Ok(files)
    }
}
