//! インフラストラクチャ層
//!
//! ファイルシステム保存、具体的な画像ソース、HTTP クライアント

pub mod capture;
pub mod http;
pub mod storage;
