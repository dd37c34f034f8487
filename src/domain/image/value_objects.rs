//! アップロード画像の値オブジェクト

use serde::{Deserialize, Serialize};
use std::fmt;

/// 保存ファイル名に残す元ファイル名の最大長
const MAX_ORIGINAL_NAME_LEN: usize = 200;

/// サニタイズ後に何も残らなかった場合の名前
const FALLBACK_NAME: &str = "upload";

/// ファイルとして受け付けるマルチパートのフィールド名（`image` が正式）
pub const FILE_FIELD_NAMES: [&str; 2] = ["image", "file"];

/// 一覧に含まれる拡張子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtension {
    Jpg,
    Jpeg,
    Png,
    Gif,
    Bmp,
    Webp,
}

impl ImageExtension {
    pub const ALL: [ImageExtension; 6] = [
        ImageExtension::Jpg,
        ImageExtension::Jpeg,
        ImageExtension::Png,
        ImageExtension::Gif,
        ImageExtension::Bmp,
        ImageExtension::Webp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExtension::Jpg => "jpg",
            ImageExtension::Jpeg => "jpeg",
            ImageExtension::Png => "png",
            ImageExtension::Gif => "gif",
            ImageExtension::Bmp => "bmp",
            ImageExtension::Webp => "webp",
        }
    }

    /// `filename` の拡張子（大文字小文字を区別しない）
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (stem, ext) = filename.rsplit_once('.')?;
        if stem.is_empty() {
            // ".png" は隠しファイルであって png ではない
            return None;
        }
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|candidate| candidate.as_str() == ext)
    }

    /// 宣言された MIME タイプに対応する拡張子
    pub fn from_mime(essence: &str) -> Option<Self> {
        match essence {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageExtension::Jpg),
            "image/png" => Some(ImageExtension::Png),
            "image/gif" => Some(ImageExtension::Gif),
            "image/bmp" | "image/x-ms-bmp" => Some(ImageExtension::Bmp),
            "image/webp" => Some(ImageExtension::Webp),
            _ => None,
        }
    }

    /// ディレクトリエントリが一覧に含まれるか
    pub fn is_listable(filename: &str) -> bool {
        Self::from_filename(filename).is_some()
    }
}

impl fmt::Display for ImageExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// クライアントが宣言したコンテンツタイプ
///
/// 宣言値のみを検査し、バイト列の中身は判定しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType(String);

impl ContentType {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// パートにコンテンツタイプが無い場合に使用
    pub fn octet_stream() -> Self {
        Self::new("application/octet-stream")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// パラメータを除いた小文字の type/subtype
    pub fn essence(&self) -> String {
        self.0
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    pub fn image_extension(&self) -> Option<ImageExtension> {
        ImageExtension::from_mime(&self.essence())
    }

    /// 保存後に一覧へ表示される `image/*` タイプか
    pub fn is_listable_image(&self) -> bool {
        self.image_extension().is_some()
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// サーバが生成する保存ファイル名
///
/// 形式: `<epochMillis>-<token>-<sanitizedOriginal>`
/// パス区切り文字を含まず、ドットで始まらない
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StoredFilename(String);

impl StoredFilename {
    pub fn generate(
        original_name: &str,
        content_type: &ContentType,
        epoch_millis: i64,
        token: &str,
    ) -> Self {
        let mut name = sanitize_original_name(original_name);
        if ImageExtension::from_filename(&name).is_none()
            && let Some(ext) = content_type.image_extension()
        {
            name.push('.');
            name.push_str(ext.as_str());
        }
        Self(format!("{epoch_millis}-{token}-{name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 書き込み中に使う隠しファイル名
    pub fn partial_name(&self) -> String {
        format!(".{}.partial", self.0)
    }
}

impl fmt::Display for StoredFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredFilename {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// クライアント指定のファイル名をパスに使える安全な形へ変換する
pub fn sanitize_original_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    // ここでは ASCII のみなのでバイト位置 = 文字位置
    // 拡張子を残すため末尾側を保持する
    if cleaned.len() > MAX_ORIGINAL_NAME_LEN {
        cleaned[cleaned.len() - MAX_ORIGINAL_NAME_LEN..].to_string()
    } else {
        cleaned.to_string()
    }
}
