//! アプリケーション層
//!
//! ドメインをストレージ・Web サービス・クライアントへ結びつけるユースケース

pub mod use_cases;
