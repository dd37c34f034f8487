//! 画像集約
//!
//! アップロード画像の検証、命名、永続化の契約

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{ImageError, ImageUpload, StoredImage};
pub use repositories::{ImageRepository, RepositoryError};
pub use services::StoredNameGenerator;
pub use value_objects::{ContentType, FILE_FIELD_NAMES, ImageExtension, StoredFilename};
