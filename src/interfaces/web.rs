//! Webインターフェース
//!
//! アップロード・一覧の JSON エンドポイント、保存済みファイルの配信、
//! 埋め込み撮影 UI を提供する

mod embedded_assets;
mod error_response;
mod image_handlers;

pub mod dto;
pub mod server;

pub use error_response::ApiError;
pub use image_handlers::ImageState;
pub(crate) use image_handlers::{list_images, upload_image};
