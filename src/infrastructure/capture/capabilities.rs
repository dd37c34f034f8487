//! Which acquisition modes this host can actually offer
//!
//! Probes for a camera device, a capture program and a picker program instead of
//! guessing from the platform.

use super::camera_source::CommandCamera;
use super::native_picker_source::NativePickerSource;
use crate::domain::capture::AcquisitionMode;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureCapabilities {
    pub camera: bool,
    pub native_picker: bool,
}

impl CaptureCapabilities {
    pub fn probe(camera: &CommandCamera, picker: &NativePickerSource) -> Self {
        let camera_ok =
            camera.device_path().exists() && find_program(camera.program()).is_some();
        let picker_ok = find_program(picker.program()).is_some();

        let capabilities = Self {
            camera: camera_ok,
            native_picker: picker_ok,
        };
        debug!("Capture capabilities: {:?}", capabilities);
        capabilities
    }

    /// Modes in order of preference; picking a file always works
    pub fn available_modes(&self) -> Vec<AcquisitionMode> {
        let mut modes = vec![AcquisitionMode::FilePicker];
        if self.native_picker {
            modes.push(AcquisitionMode::NativePicker);
        }
        if self.camera {
            modes.push(AcquisitionMode::Camera);
        }
        modes
    }

    pub fn supports(&self, mode: AcquisitionMode) -> bool {
        self.available_modes().contains(&mode)
    }
}

/// Resolve `program` like a shell would
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}
