//! 画像エンティティ

use super::value_objects::{ContentType, StoredFilename};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ストレージに触れる前にアップロードを拒否した理由
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("No file field in the upload")]
    MissingFile,
    #[error("Declared content type is not a supported image: {content_type}")]
    NotAnImage { content_type: String },
    #[error("Uploaded file is empty")]
    EmptyFile,
}

/// アップロードリクエストから取り出した検証済みファイル
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub content_type: ContentType,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// 本文を読む前に宣言タイプを検査する
    ///
    /// 一覧対象の拡張子に対応するタイプのみ受け付けるため、
    /// 保存されたアップロードは必ず一覧に表示される
    pub fn check_content_type(content_type: &ContentType) -> Result<(), ImageError> {
        if content_type.is_listable_image() {
            Ok(())
        } else {
            Err(ImageError::NotAnImage {
                content_type: content_type.to_string(),
            })
        }
    }

    pub fn new(
        original_name: impl Into<String>,
        content_type: ContentType,
        bytes: Vec<u8>,
    ) -> Result<Self, ImageError> {
        Self::check_content_type(&content_type)?;
        if bytes.is_empty() {
            return Err(ImageError::EmptyFile);
        }

        Ok(Self {
            original_name: original_name.into(),
            content_type,
            bytes,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// 保存ルートに格納された受理済みアップロード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredImage {
    pub filename: StoredFilename,
    /// 拡張子から推定
    pub mime_type: String,
    pub size: u64,
    pub stored_at: DateTime<Utc>,
}

impl StoredImage {
    pub fn new(filename: StoredFilename, size: u64) -> Self {
        let mime_type = mime_guess::from_path(filename.as_str())
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Self {
            filename,
            mime_type,
            size,
            stored_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_accepts_images() {
        let upload =
            ImageUpload::new("photo.png", ContentType::new("image/png"), vec![1, 2, 3]).unwrap();
        assert_eq!(upload.original_name, "photo.png");
        assert_eq!(upload.size(), 3);
    }

    #[test]
    fn test_upload_rejects_non_images() {
        let err = ImageUpload::new("note.txt", ContentType::new("text/plain"), vec![1]).unwrap_err();
        assert_eq!(
            err,
            ImageError::NotAnImage {
                content_type: "text/plain".to_string()
            }
        );
    }

    #[test]
    fn test_upload_rejects_unlisted_image_types() {
        for declared in ["image/svg+xml", "image/x-icon", "image/tiff"] {
            let err = ImageUpload::new("logo.svg", ContentType::new(declared), vec![1]).unwrap_err();
            assert!(matches!(err, ImageError::NotAnImage { .. }), "{declared}");
        }
    }

    #[test]
    fn test_upload_rejects_empty_files() {
        let err = ImageUpload::new("photo.png", ContentType::new("image/png"), Vec::new())
            .unwrap_err();
        assert_eq!(err, ImageError::EmptyFile);
    }

    #[test]
    fn test_stored_image_mime_from_extension() {
        let name = StoredFilename::generate("cat.webp", &ContentType::new("image/webp"), 5, "abcd1234");
        let image = StoredImage::new(name, 10);
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.size, 10);
    }
}
