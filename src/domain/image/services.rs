//! 画像のドメインサービス

use super::value_objects::{ContentType, StoredFilename};
use chrono::Utc;
use uuid::Uuid;

/// 保存ファイル名に埋め込むランダムトークンの長さ
const TOKEN_LEN: usize = 8;

/// 新しい保存ファイル名を払い出す
///
/// ミリ秒のタイムスタンプで時系列順を保ち、ランダムトークンで
/// 同一ミリ秒内の同名アップロードを区別する
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredNameGenerator;

impl StoredNameGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn next(&self, original_name: &str, content_type: &ContentType) -> StoredFilename {
        let epoch_millis = Utc::now().timestamp_millis();
        StoredFilename::generate(original_name, content_type, epoch_millis, &Self::token())
    }

    fn token() -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(TOKEN_LEN);
        token
    }
}
