//! Export core modules shared across CLI and WASM wrappers.

pub mod csv_core;
pub mod text_core;

pub use csv_core::{csv_disk_file_name, csv_file_name, render_csv, sanitize_vendor};
pub use text_core::render_clipboard_text;

/// フィールド値のエスケープ方式
///
/// - `Verbatim`: 値をそのまま埋め込む（区切り文字を含む値は崩れる）
/// - `Escaped`: CSVは `"` を `""` に、テキストはタブ・改行を空白に置換
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldEscaping {
    #[default]
    Verbatim,
    Escaped,
}

impl FieldEscaping {
    pub fn from_flag(escape: bool) -> Self {
        if escape {
            FieldEscaping::Escaped
        } else {
            FieldEscaping::Verbatim
        }
    }
}
