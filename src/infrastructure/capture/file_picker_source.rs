use crate::domain::capture::{AcquiredImage, AcquisitionError, AcquisitionMode, ImageSource};
use crate::domain::image::ImageExtension;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An existing file chosen by the user, restricted to image types
pub struct FilePickerSource {
    path: PathBuf,
}

impl FilePickerSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `path` the way a picked file is read
    pub(crate) async fn read_image(path: &Path) -> Result<AcquiredImage, AcquisitionError> {
        let is_image = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(ImageExtension::is_listable);
        if !is_image {
            return Err(AcquisitionError::NotAnImage {
                path: path.to_path_buf(),
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| AcquisitionError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Picked {} ({} bytes)", path.display(), bytes.len());

        Ok(AcquiredImage::from_file(path, bytes))
    }
}

#[async_trait]
impl ImageSource for FilePickerSource {
    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::FilePicker
    }

    async fn acquire(&self) -> Result<AcquiredImage, AcquisitionError> {
        Self::read_image(&self.path).await
    }
}
