//! CSVダウンロード（ファイル書き出し）

use crate::error::Result;
use receipt_itemizer_common::{csv_disk_file_name, render_csv, FieldEscaping, Receipt};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// 確認中のレシートをCSVとして出力先フォルダに書き出す
///
/// ファイル名は `receipt_<店名>_<エポックミリ秒>.csv`（パスに使えない文字は `_`）。
/// 同名ファイルがあればミリ秒を進めて空き名を探す。
pub fn write_csv(
    receipt: &Receipt,
    output_dir: &Path,
    escaping: FieldEscaping,
    timestamp_ms: i64,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let csv = render_csv(&receipt.vendor, &receipt.items, escaping);

    let mut timestamp = timestamp_ms;
    loop {
        let path = output_dir.join(csv_disk_file_name(&receipt.vendor, timestamp));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                file.write_all(csv.as_bytes())?;
                tracing::debug!(path = %path.display(), items = receipt.items.len(), "csv written");
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => timestamp += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// 現在時刻（エポックミリ秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
