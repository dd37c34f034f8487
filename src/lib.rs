//! # Camera Uploader
//!
//! カメラで撮影、またはファイルから選択した画像を HTTP サービスへアップロードし、
//! アップロード済みの画像を一覧表示するシステム
//!
//! このクレートは以下の層に分かれています：
//!
//! - **Domain Layer**: 保存画像、ファイル名規則、撮影の状態遷移
//! - **Application Layer**: アップロード・一覧のユースケースと撮影コントローラ
//! - **Infrastructure Layer**: ファイルシステム保存、画像ソース、HTTP クライアント
//! - **Interface Layer**: axum の Web サービスと埋め込みブラウザ UI

pub mod application;
pub mod config;
pub mod debug;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

// 公開API
pub use config::ServerConfig;
pub use domain::*;
