//! ブラウザ向けエクスポート（CSVダウンロード / クリップボード）

pub mod clipboard;
pub mod download;
