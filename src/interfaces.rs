//! インターフェース層
//!
//! HTTP サービスと、それが配信するブラウザ UI

pub mod web;
