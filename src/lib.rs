//! Receipt Itemizer CLI
//!
//! レシート画像を抽出バックエンドに送り、明細を確認・編集して
//! CSVファイルまたはクリップボードに出力する

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extractor;
pub mod review;
pub mod scanner;
