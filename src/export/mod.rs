pub mod clipboard;
pub mod csv;

use crate::cli::ExportFormat;
use crate::error::Result;
use receipt_itemizer_common::{render_clipboard_text, FieldEscaping, Receipt};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub escaping: FieldEscaping,
}

/// CSVを書き出して保存先を表示
pub fn export_csv(receipt: &Receipt, options: &ExportOptions) -> Result<PathBuf> {
    println!("- CSVを生成中...");
    let path = csv::write_csv(receipt, &options.output_dir, options.escaping, csv::now_millis())?;
    println!("✔ CSV出力: {}", path.display());
    Ok(path)
}

/// タブ区切りテキストをクリップボードへ
///
/// 書き込めない環境ではテキストを標準出力に表示してエラーを返す。
pub fn copy_to_clipboard(receipt: &Receipt, options: &ExportOptions) -> Result<()> {
    let text = render_clipboard_text(&receipt.vendor, &receipt.items, options.escaping);

    match clipboard::copy_text(&text) {
        Ok(_) => {
            println!("✔ Copied to clipboard!");
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ {}", e);
            println!("--- クリップボード用テキスト ---");
            print!("{}", text);
            println!("-------------------------------");
            Err(e)
        }
    }
}

pub fn export_receipt(receipt: &Receipt, format: &ExportFormat, options: &ExportOptions) -> Result<()> {
    match format {
        ExportFormat::Csv => {
            export_csv(receipt, options)?;
        }
        ExportFormat::Clipboard => {
            copy_to_clipboard(receipt, options)?;
        }
        ExportFormat::Both => {
            export_csv(receipt, options)?;
            // CSVは出力済みなのでクリップボード失敗は警告に留める
            if let Err(e) = copy_to_clipboard(receipt, options) {
                tracing::warn!(error = %e, "clipboard unavailable, csv export kept");
            }
        }
    }

    Ok(())
}
