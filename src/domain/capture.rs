//! 撮影集約
//!
//! 画像の取得、アップロードまでの保持、一時的な通知による進捗表示を
//! クライアント側でモデル化する

pub mod notice;
pub mod service;
pub mod source;
pub mod state;

pub use notice::{NOTICE_TTL, Notice, NoticeBoard, NoticeKind};
pub use service::{ImageService, ServiceError};
pub use source::{AcquiredImage, AcquisitionError, AcquisitionMode, ImageSource};
pub use state::{CaptureError, CaptureState};
