//! クリップボード用テキスト生成（タブ区切り）

use super::FieldEscaping;
use crate::types::{ItemField, LineItem};

pub const TEXT_HEADER: &str = "Qty\tName\tItem #\tPrice";

/// クリップボードに書き込むテキストを生成
///
/// ```text
/// Vendor: <店名>
///
/// Qty	Name	Item #	Price
/// 1	Milk	100	3.50
/// ```
pub fn render_clipboard_text(vendor: &str, items: &[LineItem], escaping: FieldEscaping) -> String {
    let mut text = format!("Vendor: {}\n\n", clean(vendor, escaping));
    text.push_str(TEXT_HEADER);
    text.push('\n');

    for item in items {
        let row: Vec<String> = ItemField::ALL
            .iter()
            .map(|&field| clean(item.field(field), escaping))
            .collect();
        text.push_str(&row.join("\t"));
        text.push('\n');
    }

    text
}

fn clean(value: &str, escaping: FieldEscaping) -> String {
    match escaping {
        FieldEscaping::Verbatim => value.to_string(),
        FieldEscaping::Escaped => value.replace(['\t', '\r', '\n'], " "),
    }
}
