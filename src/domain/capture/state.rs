//! 撮影の状態遷移
//!
//! `Idle -> Previewing -> Captured -> Uploading -> Done | Failed`
//!
//! `Failed` は再送できるよう画像を保持し、`Done` は破棄する

use super::source::{AcquiredImage, AcquisitionMode};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("No image to upload.")]
    NothingToUpload,
    #[error("An upload is already in progress.")]
    UploadInProgress,
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CaptureState {
    #[default]
    Idle,
    /// 取得中（カメラのプレビュー、またはピッカー表示中）
    Previewing(AcquisitionMode),
    Captured(AcquiredImage),
    Uploading(AcquiredImage),
    Done,
    Failed {
        image: AcquiredImage,
        reason: String,
    },
}

impl CaptureState {
    pub fn name(&self) -> &'static str {
        match self {
            CaptureState::Idle => "idle",
            CaptureState::Previewing(_) => "previewing",
            CaptureState::Captured(_) => "captured",
            CaptureState::Uploading(_) => "uploading",
            CaptureState::Done => "done",
            CaptureState::Failed { .. } => "failed",
        }
    }

    /// アップロード待ち（またはアップロード中）の画像
    pub fn pending_image(&self) -> Option<&AcquiredImage> {
        match self {
            CaptureState::Captured(image)
            | CaptureState::Uploading(image)
            | CaptureState::Failed { image, .. } => Some(image),
            _ => None,
        }
    }

    /// 取得を開始する（保持中の画像は破棄）
    pub fn start_preview(&mut self, mode: AcquisitionMode) -> Result<(), CaptureError> {
        match self {
            CaptureState::Uploading(_) => Err(CaptureError::UploadInProgress),
            CaptureState::Previewing(_) => Err(self.invalid("start another acquisition")),
            _ => {
                *self = CaptureState::Previewing(mode);
                Ok(())
            }
        }
    }

    /// 取得を中止して待機状態へ戻る
    pub fn cancel_preview(&mut self) -> Result<(), CaptureError> {
        match self {
            CaptureState::Previewing(_) => {
                *self = CaptureState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("cancel a preview")),
        }
    }

    pub fn capture(&mut self, image: AcquiredImage) -> Result<(), CaptureError> {
        match self {
            CaptureState::Previewing(_) => {
                *self = CaptureState::Captured(image);
                Ok(())
            }
            _ => Err(self.invalid("capture")),
        }
    }

    /// `Uploading` へ遷移し、送信する画像を返す
    pub fn begin_upload(&mut self) -> Result<AcquiredImage, CaptureError> {
        let image = match std::mem::take(self) {
            CaptureState::Captured(image) | CaptureState::Failed { image, .. } => image,
            uploading @ CaptureState::Uploading(_) => {
                *self = uploading;
                return Err(CaptureError::UploadInProgress);
            }
            other => {
                *self = other;
                return Err(CaptureError::NothingToUpload);
            }
        };

        *self = CaptureState::Uploading(image.clone());
        Ok(image)
    }

    pub fn upload_succeeded(&mut self) -> Result<(), CaptureError> {
        match self {
            CaptureState::Uploading(_) => {
                *self = CaptureState::Done;
                Ok(())
            }
            _ => Err(self.invalid("finish an upload")),
        }
    }

    pub fn upload_failed(&mut self, reason: impl Into<String>) -> Result<(), CaptureError> {
        match std::mem::take(self) {
            CaptureState::Uploading(image) => {
                *self = CaptureState::Failed {
                    image,
                    reason: reason.into(),
                };
                Ok(())
            }
            other => {
                *self = other;
                Err(self.invalid("fail an upload"))
            }
        }
    }

    fn invalid(&self, action: &'static str) -> CaptureError {
        CaptureError::InvalidTransition {
            action,
            state: self.name(),
        }
    }
}
