use crate::domain::capture::{AcquiredImage, AcquisitionError, AcquisitionMode, ImageSource};
use crate::domain::image::ContentType;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Name given to frames grabbed from the camera
pub const CAPTURED_FILENAME: &str = "captured_image.png";

/// A live camera stream that can hand out one frame
#[async_trait]
pub trait CameraDevice: Send + Sync {
    /// Open the stream and start previewing
    async fn start(&self) -> Result<(), AcquisitionError>;

    /// Freeze the current frame as PNG bytes
    async fn grab_frame(&self) -> Result<Vec<u8>, AcquisitionError>;

    /// Release the stream
    async fn stop(&self);
}

/// Camera acquisition: start, grab one frame, always stop
pub struct CameraSource<D> {
    device: D,
}

impl<D: CameraDevice> CameraSource<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

#[async_trait]
impl<D: CameraDevice> ImageSource for CameraSource<D> {
    fn mode(&self) -> AcquisitionMode {
        AcquisitionMode::Camera
    }

    async fn acquire(&self) -> Result<AcquiredImage, AcquisitionError> {
        self.device.start().await?;
        info!("Camera opened. Ready to capture.");

        let frame = self.device.grab_frame().await;
        self.device.stop().await;

        let bytes = frame?;
        if bytes.is_empty() {
            return Err(AcquisitionError::CaptureFailed(
                "camera returned an empty frame".to_string(),
            ));
        }
        info!("Image captured ({} bytes)", bytes.len());

        Ok(AcquiredImage::new(
            CAPTURED_FILENAME,
            ContentType::new("image/png"),
            bytes,
        ))
    }
}

/// Grabs a frame by running an external capture program (ffmpeg by default)
/// that writes one PNG to stdout
#[derive(Debug, Clone)]
pub struct CommandCamera {
    device_path: PathBuf,
    program: String,
}

impl Default for CommandCamera {
    fn default() -> Self {
        Self::new("/dev/video0")
    }
}

impl CommandCamera {
    pub fn new(device_path: impl Into<PathBuf>) -> Self {
        Self {
            device_path: device_path.into(),
            program: "ffmpeg".to_string(),
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn device_path(&self) -> &Path {
        &self.device_path
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn capture_args(&self) -> Vec<String> {
        vec![
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-f".to_string(),
            "v4l2".to_string(),
            "-i".to_string(),
            self.device_path.display().to_string(),
            "-frames:v".to_string(),
            "1".to_string(),
            "-f".to_string(),
            "image2pipe".to_string(),
            "-vcodec".to_string(),
            "png".to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl CameraDevice for CommandCamera {
    async fn start(&self) -> Result<(), AcquisitionError> {
        if !tokio::fs::try_exists(&self.device_path).await.unwrap_or(false) {
            return Err(AcquisitionError::DeviceUnavailable(format!(
                "{} does not exist",
                self.device_path.display()
            )));
        }
        debug!("Using camera {}", self.device_path.display());
        Ok(())
    }

    async fn grab_frame(&self) -> Result<Vec<u8>, AcquisitionError> {
        let output = Command::new(&self.program)
            .args(self.capture_args())
            .output()
            .await
            .map_err(|e| {
                AcquisitionError::DeviceUnavailable(format!("failed to run {}: {e}", self.program))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("{} exited with {}: {}", self.program, output.status, stderr.trim());
            return Err(AcquisitionError::CaptureFailed(stderr.trim().to_string()));
        }

        Ok(output.stdout)
    }

    async fn stop(&self) {
        // The capture process closes the device when it exits
        debug!("Camera stream stopped");
    }
}
