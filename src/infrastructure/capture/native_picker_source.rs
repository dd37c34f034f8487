use super::file_picker_source::FilePickerSource;
use crate::domain::capture::{AcquiredImage, AcquisitionError, AcquisitionMode, ImageSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::debug;

/// A host-provided picker program that prints the chosen path on stdout
///
/// The chosen file is wrapped exactly like a file picked by hand.
#[derive(Debug, Clone)]
pub struct NativePickerSource {
    program: String,
    args: Vec<String>,
}

impl Default for NativePickerSource {
    fn default() -> Self {
        Self::new(
            "zenity",
            [
                "--file-selection",
                "--title=Select an image",
                "--file-filter=Images | *.jpg *.jpeg *.png *.gif *.bmp *.webp",
            ],
        )
    }
}

impl NativePickerSource {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl ImageSource for NativePickerSource {
    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::NativePicker
    }

    async fn acquire(&self) -> Result<AcquiredImage, AcquisitionError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .await
            .map_err(|e| {
                AcquisitionError::DeviceUnavailable(format!("failed to run {}: {e}", self.program))
            })?;

        // Pickers exit non-zero when the dialog is dismissed
        if !output.status.success() {
            return Err(AcquisitionError::Cancelled);
        }

        let chosen = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if chosen.is_empty() {
            return Err(AcquisitionError::Cancelled);
        }
        debug!("{} picked {}", self.program, chosen);

        FilePickerSource::read_image(&PathBuf::from(chosen)).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picked_path_is_read_like_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("from-picker.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let picker = NativePickerSource::new("echo", [path.display().to_string()]);
        let image = picker.acquire().await.unwrap();

        assert_eq!(picker.mode(), AcquisitionMode::NativePicker);
        assert_eq!(image.filename, "from-picker.gif");
        assert_eq!(image.content_type.as_str(), "image/gif");
        assert_eq!(image.bytes, b"GIF89a");
    }

    #[tokio::test]
    async fn test_dismissed_picker_is_cancelled() {
        let picker = NativePickerSource::new("false", Vec::<String>::new());
        let err = picker.acquire().await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Cancelled));
    }

    #[tokio::test]
    async fn test_missing_program() {
        let picker = NativePickerSource::new("definitely-not-a-picker-xyz", Vec::<String>::new());
        let err = picker.acquire().await.unwrap_err();
        assert!(matches!(err, AcquisitionError::DeviceUnavailable(_)));
    }
}
