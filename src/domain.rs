//! ドメイン層
//!
//! 保存画像、ファイル名規則、クライアント側の撮影モデル

pub mod capture;
pub mod image;
