//! クライアントから見たアップロードサービス

use super::source::AcquiredImage;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// HTTP レスポンスが得られなかった
    #[error("Request failed: {0}")]
    Transport(String),
    /// サービスが失敗を返した
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// サービス自身が返した空でないメッセージ
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ServiceError::Rejected { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ImageService: Send + Sync {
    /// 画像を 1 枚送信し、サービスの確認メッセージを返す
    async fn upload(&self, image: &AcquiredImage) -> Result<String, ServiceError>;

    /// 現在の一覧にあるファイル名
    async fn list(&self) -> Result<Vec<String>, ServiceError>;

    /// 一覧にあるファイルの公開 URL
    fn file_url(&self, filename: &str) -> String;
}
