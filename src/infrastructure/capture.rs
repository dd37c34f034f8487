//! Concrete image sources and capability probing

pub mod camera_source;
pub mod capabilities;
pub mod file_picker_source;
pub mod native_picker_source;

pub use camera_source::{CameraDevice, CameraSource, CommandCamera};
pub use capabilities::CaptureCapabilities;
pub use file_picker_source::FilePickerSource;
pub use native_picker_source::NativePickerSource;
