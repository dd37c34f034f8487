use crate::domain::image::{ImageRepository, RepositoryError, StoredFilename, StoredImage};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Stores uploads as plain files in one flat directory
pub struct FilesystemImageRepository {
    root: PathBuf,
}

impl FilesystemImageRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn write_new_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path).await {
            warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
    }
}

#[async_trait]
impl ImageRepository for FilesystemImageRepository {
    async fn ensure_root(&self) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|source| RepositoryError::CreateRoot { source })?;
        debug!("Storage root ready: {}", self.root.display());
        Ok(())
    }

    async fn save(
        &self,
        name: &StoredFilename,
        bytes: &[u8],
    ) -> Result<StoredImage, RepositoryError> {
        let final_path = self.root.join(name.as_str());
        let partial_path = self.root.join(name.partial_name());

        let exists = fs::try_exists(&final_path)
            .await
            .map_err(|source| RepositoryError::Write {
                name: name.to_string(),
                source,
            })?;
        if exists {
            return Err(RepositoryError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let written = crate::measure_time!("write_upload", {
            Self::write_new_file(&partial_path, bytes).await
        });
        if let Err(source) = written {
            Self::discard(&partial_path).await;
            return Err(RepositoryError::Write {
                name: name.to_string(),
                source,
            });
        }

        if let Err(source) = fs::rename(&partial_path, &final_path).await {
            Self::discard(&partial_path).await;
            return Err(RepositoryError::Write {
                name: name.to_string(),
                source,
            });
        }

        info!("Stored {} ({} bytes)", name, bytes.len());
        Ok(StoredImage::new(name.clone(), bytes.len() as u64))
    }

    async fn list_entries(&self) -> Result<Vec<String>, RepositoryError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|source| RepositoryError::Read { source })?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| RepositoryError::Read { source })?
        {
            let is_file = entry
                .file_type()
                .await
                .map(|file_type| file_type.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 entry: {:?}", raw),
            }
        }

        Ok(names)
    }
}
