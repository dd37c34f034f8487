//! アップロード画像の保存に関する契約

use super::entities::StoredImage;
use super::value_objects::StoredFilename;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Stored file already exists: {name}")]
    AlreadyExists { name: String },
    #[error("Failed to write {name}: {source}")]
    Write {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read storage root: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create storage root: {source}")]
    CreateRoot {
        #[source]
        source: std::io::Error,
    },
}

/// 保存ルートを管理するリポジトリ
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// 保存ルートが無ければ作成する
    async fn ensure_root(&self) -> Result<(), RepositoryError>;

    /// `bytes` を `name` で保存する
    ///
    /// 既存ファイルは上書きせず、書きかけのファイルを `name` で残すこともない
    async fn save(&self, name: &StoredFilename, bytes: &[u8])
    -> Result<StoredImage, RepositoryError>;

    /// 保存ルート直下の通常ファイル名をすべて返す
    async fn list_entries(&self) -> Result<Vec<String>, RepositoryError>;
}
