//! 画像ソース
//!
//! どの取得モードも同じ [`AcquiredImage`] を返すため、
//! アップロード処理は画像の出どころを意識しない

use crate::domain::image::ContentType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 画像の取得方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionMode {
    FilePicker,
    Camera,
    NativePicker,
}

impl fmt::Display for AcquisitionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcquisitionMode::FilePicker => write!(f, "file picker"),
            AcquisitionMode::Camera => write!(f, "camera"),
            AcquisitionMode::NativePicker => write!(f, "native picker"),
        }
    }
}

/// アップロード待ちでメモリに保持している画像
#[derive(Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    pub filename: String,
    pub content_type: ContentType,
    pub bytes: Vec<u8>,
}

impl AcquiredImage {
    pub fn new(filename: impl Into<String>, content_type: ContentType, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type,
            bytes,
        }
    }

    /// `path` から読んだバイト列を、ファイル名とタイプを付けて包む
    pub fn from_file(path: &std::path::Path, bytes: Vec<u8>) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let content_type =
            ContentType::new(mime_guess::from_path(path).first_or_octet_stream().essence_str());

        Self::new(filename, content_type, bytes)
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// 画像のバイト列はログに出さない
impl fmt::Debug for AcquiredImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquiredImage")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("No image was selected")]
    Cancelled,
    #[error("Not an image file: {}", .path.display())]
    NotAnImage { path: PathBuf },
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),
    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// 画像を取得する手段
#[async_trait]
pub trait ImageSource: Send + Sync {
    fn mode(&self) -> AcquisitionMode;

    async fn acquire(&self) -> Result<AcquiredImage, AcquisitionError>;
}
