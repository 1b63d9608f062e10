//! CSV生成（共通ライブラリ）
//!
//! 1行目はヘッダー、以降は明細1件につき1行。
//! すべてのフィールドをダブルクォートで囲み、各行に店名を繰り返す。

use super::FieldEscaping;
use crate::types::{ItemField, LineItem};
use regex::Regex;

pub const CSV_HEADER: &str = "Vendor,Quantity,Item Name,Item Number,Price";

lazy_static::lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref RESERVED_PATH_CHAR: Regex = Regex::new(r#"[/\\:*?"<>|\x00-\x1f\x7f]"#).unwrap();
}

/// 明細をCSV文字列に変換
///
/// 改行は `\n`、最終行も改行で終わる。
pub fn render_csv(vendor: &str, items: &[LineItem], escaping: FieldEscaping) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + items.len() * 48);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    let vendor = quote(vendor, escaping);
    for item in items {
        csv.push_str(&vendor);
        for field in ItemField::ALL {
            csv.push(',');
            csv.push_str(&quote(item.field(field), escaping));
        }
        csv.push('\n');
    }

    csv
}

fn quote(value: &str, escaping: FieldEscaping) -> String {
    match escaping {
        FieldEscaping::Verbatim => format!("\"{}\"", value),
        FieldEscaping::Escaped => format!("\"{}\"", value.replace('"', "\"\"")),
    }
}

/// 店名の空白の連続を `_` 1文字に置換
pub fn sanitize_vendor(vendor: &str) -> String {
    WHITESPACE_RUN.replace_all(vendor, "_").into_owned()
}

/// ダウンロードファイル名: `receipt_<店名>_<エポックミリ秒>.csv`
pub fn csv_file_name(vendor: &str, timestamp_ms: i64) -> String {
    format!("receipt_{}_{}.csv", sanitize_vendor(vendor), timestamp_ms)
}

/// ディスク保存用ファイル名
///
/// `csv_file_name` に加えて、パス区切りやWindowsで使えない文字を `_` に置換する。
pub fn csv_disk_file_name(vendor: &str, timestamp_ms: i64) -> String {
    let vendor = sanitize_vendor(vendor);
    let vendor = RESERVED_PATH_CHAR.replace_all(&vendor, "_");
    format!("receipt_{}_{}.csv", vendor, timestamp_ms)
}
