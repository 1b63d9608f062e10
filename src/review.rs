//! 対話式レシート確認モジュール
//!
//! 抽出結果を表示し、店名・明細の編集とCSV/クリップボード出力を行う

use crate::error::{ItemizerError, Result};
use crate::export::{self, ExportOptions};
use crate::extractor::ReceiptFile;
use dialoguer::{Confirm, Input, Select};
use receipt_itemizer_common::{ItemField, Receipt, Session};
use std::path::{Path, PathBuf};

/// 確認画面の操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    EditVendor,
    EditItem,
    AddItem,
    DeleteItem,
    ExportCsv,
    CopyToClipboard,
    NewReceipt,
    Quit,
}

impl ReviewAction {
    pub const ALL: [ReviewAction; 8] = [
        ReviewAction::EditVendor,
        ReviewAction::EditItem,
        ReviewAction::AddItem,
        ReviewAction::DeleteItem,
        ReviewAction::ExportCsv,
        ReviewAction::CopyToClipboard,
        ReviewAction::NewReceipt,
        ReviewAction::Quit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReviewAction::EditVendor => "店名を編集",
            ReviewAction::EditItem => "明細を編集",
            ReviewAction::AddItem => "+ 明細を追加",
            ReviewAction::DeleteItem => "明細を削除",
            ReviewAction::ExportCsv => "CSV出力",
            ReviewAction::CopyToClipboard => "クリップボードにコピー",
            ReviewAction::NewReceipt => "新しいレシート",
            ReviewAction::Quit => "終了",
        }
    }

    /// 明細が1件以上必要な操作
    fn needs_items(&self) -> bool {
        matches!(self, ReviewAction::EditItem | ReviewAction::DeleteItem)
    }
}

/// 確認ループの終わり方
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// セッションを破棄して次の画像へ
    NewReceipt(PathBuf),
    Quit,
}

/// 確認画面の表を組み立てる
pub fn format_receipt(receipt: &Receipt) -> String {
    let mut widths: Vec<usize> = ItemField::ALL.iter().map(|f| f.label().chars().count()).collect();
    for item in &receipt.items {
        for (i, field) in ItemField::ALL.iter().enumerate() {
            widths[i] = widths[i].max(item.field(*field).chars().count());
        }
    }

    let row = |cells: Vec<&str>, index: &str| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("{:>4}  {}", index, padded.join("  ")).trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&format!("画像: {}\n", receipt.image_url));
    out.push_str(&format!("店名: {}\n\n", receipt.vendor));
    out.push_str(&row(ItemField::ALL.iter().map(|f| f.label()).collect(), "#"));
    out.push('\n');

    if receipt.items.is_empty() {
        out.push_str("      (明細なし)\n");
    }
    for (i, item) in receipt.items.iter().enumerate() {
        let cells = ItemField::ALL.iter().map(|f| item.field(*f)).collect();
        out.push_str(&row(cells, &(i + 1).to_string()));
        out.push('\n');
    }

    out
}

/// 確認ループ
///
/// 「新しいレシート」でセッションをリセットし、次の画像パスを返す。
pub fn run_review(
    session: &mut Session<ReceiptFile>,
    options: &ExportOptions,
) -> Result<ReviewOutcome> {
    loop {
        let Some(receipt) = session.receipt() else {
            return Ok(ReviewOutcome::Quit);
        };
        println!("\n{}", format_receipt(receipt));
        let item_count = receipt.items.len();

        let labels: Vec<&str> = ReviewAction::ALL.iter().map(|a| a.label()).collect();
        let selected = Select::new()
            .with_prompt("操作を選択")
            .items(&labels)
            .default(0)
            .interact()?;
        let action = ReviewAction::ALL[selected];

        if action.needs_items() && item_count == 0 {
            println!("  → 明細がありません");
            continue;
        }

        match action {
            ReviewAction::EditVendor => {
                let current = receipt.vendor.clone();
                let vendor: String = Input::new()
                    .with_prompt("店名")
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                session.set_vendor_name(vendor)?;
            }
            ReviewAction::EditItem => {
                let index = prompt_item_index(item_count)?;
                let field_labels: Vec<&str> = ItemField::ALL.iter().map(|f| f.label()).collect();
                let field = ItemField::ALL[Select::new()
                    .with_prompt("項目")
                    .items(&field_labels)
                    .default(0)
                    .interact()?];
                let current = session
                    .receipt()
                    .map(|r| r.items[index].field(field).to_string())
                    .unwrap_or_default();
                let value: String = Input::new()
                    .with_prompt(field.label())
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()?;
                session.edit_item(index, field, value)?;
            }
            ReviewAction::AddItem => {
                let index = session.add_item()?;
                println!("  → {}行目を追加", index + 1);
            }
            ReviewAction::DeleteItem => {
                let index = prompt_item_index(item_count)?;
                let removed = session.delete_item(index)?;
                println!("  → 削除: {} {}", removed.quantity, removed.name);
            }
            ReviewAction::ExportCsv => {
                export_current(session, options);
            }
            ReviewAction::CopyToClipboard => {
                if let Some(receipt) = session.receipt() {
                    // 失敗時はテキストを表示済み、確認は続ける
                    let _ = export::copy_to_clipboard(receipt, options);
                }
            }
            ReviewAction::NewReceipt => {
                let confirmed = Confirm::new()
                    .with_prompt("現在の内容を破棄しますか？")
                    .default(true)
                    .interact()?;
                if !confirmed {
                    continue;
                }
                session.reset();
                return Ok(match prompt_image_path()? {
                    Some(path) => ReviewOutcome::NewReceipt(path),
                    None => ReviewOutcome::Quit,
                });
            }
            ReviewAction::Quit => return Ok(ReviewOutcome::Quit),
        }
    }
}

/// 確認中のレシートをCSV出力
///
/// 書き出しに失敗しても編集内容は残したまま確認を続ける。
fn export_current(session: &Session<ReceiptFile>, options: &ExportOptions) -> Option<PathBuf> {
    let receipt = session.receipt()?;
    match export::export_csv(receipt, options) {
        Ok(path) => Some(path),
        Err(e) => {
            println!("✗ CSV出力に失敗しました: {}", e);
            tracing::warn!(error = %e, "csv export failed");
            None
        }
    }
}

/// 1始まりの行番号を入力させ、0始まりの位置を返す
fn prompt_item_index(item_count: usize) -> Result<usize> {
    let number: usize = Input::new()
        .with_prompt(format!("行番号 (1-{})", item_count))
        .validate_with(|n: &usize| -> std::result::Result<(), String> {
            if (1..=item_count).contains(n) {
                Ok(())
            } else {
                Err(format!("1から{}の範囲で入力してください", item_count))
            }
        })
        .interact_text()?;
    Ok(number - 1)
}

/// 入力されたパスの画像を開く
///
/// 見つからない場合は表示して `None`（呼び出し側で再入力させる）。
pub fn open_entered_image(path: &Path) -> Result<Option<ReceiptFile>> {
    match ReceiptFile::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(ItemizerError::FileNotFound(missing)) => {
            println!("✗ ファイルが見つかりません: {}", missing);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// 次のレシート画像のパスを入力（空欄で終了）
pub fn prompt_image_path() -> Result<Option<PathBuf>> {
    let input: String = Input::new()
        .with_prompt("レシート画像のパス（空欄で終了）")
        .allow_empty(true)
        .interact_text()?;
    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_itemizer_common::{ExtractionResponse, FieldEscaping, LineItem};
    use tempfile::tempdir;

    fn reviewing_session(vendor: &str) -> Session<ReceiptFile> {
        let mut session = Session::new();
        session.select_file(ReceiptFile::new("a.jpg", b"jpeg".to_vec())).unwrap();
        session.begin_submit().unwrap();
        let response = ExtractionResponse {
            vendor: vendor.to_string(),
            items: vec![LineItem::new("1", "Milk", "100", "3.50")],
            image_url: "/uploads/a.jpg".to_string(),
        };
        session.finish_submit(Ok(response), "http://localhost:5000").unwrap();
        session
    }

    #[test]
    fn test_export_current_writes_sanitized_name() {
        let dir = tempdir().unwrap();
        let options = ExportOptions {
            output_dir: dir.path().to_path_buf(),
            escaping: FieldEscaping::Verbatim,
        };
        let session = reviewing_session("A/B Market");

        let path = export_current(&session, &options).unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("receipt_A_B_Market_"));
    }

    #[test]
    fn test_open_entered_image_missing_path() {
        let dir = tempdir().unwrap();
        let result = open_entered_image(&dir.path().join("typo.jpg")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_open_entered_image_existing_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("receipt.png");
        std::fs::write(&path, b"png").unwrap();

        let file = open_entered_image(&path).unwrap().unwrap();
        assert_eq!(file.file_name, "receipt.png");
        assert_eq!(file.mime_type, "image/png");
    }

    #[cfg(unix)]
    #[test]
    fn test_export_current_failure_keeps_session() {
        let dir = tempdir().unwrap();
        let blocked = dir.path().join("not-a-dir");
        std::fs::write(&blocked, b"").unwrap();
        let options = ExportOptions {
            output_dir: blocked,
            escaping: FieldEscaping::Verbatim,
        };
        let mut session = reviewing_session("Store A");
        session.set_vendor_name("Edited Store").unwrap();

        assert!(export_current(&session, &options).is_none());
        assert!(session.is_reviewing());
        assert_eq!(session.receipt().unwrap().vendor, "Edited Store");
    }

    #[test]
    fn test_format_receipt() {
        let receipt = Receipt {
            image_url: "http://localhost:5000/uploads/a.jpg".into(),
            vendor: "Store A".into(),
            items: vec![
                LineItem::new("1", "Milk", "100", "3.50"),
                LineItem::new("12", "Sourdough Bread", "200", "2.00"),
            ],
        };

        let text = format_receipt(&receipt);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "画像: http://localhost:5000/uploads/a.jpg");
        assert_eq!(lines[1], "店名: Store A");
        assert_eq!(lines[3], "   #  Qty  Name             Item #  Price");
        assert_eq!(lines[4], "   1  1    Milk             100     3.50");
        assert_eq!(lines[5], "   2  12   Sourdough Bread  200     2.00");
    }

    #[test]
    fn test_format_receipt_without_items() {
        let receipt = Receipt {
            vendor: "Empty".into(),
            ..Default::default()
        };
        assert!(format_receipt(&receipt).contains("(明細なし)"));
    }

    #[test]
    fn test_review_actions() {
        assert_eq!(ReviewAction::ALL.len(), 8);
        assert!(ReviewAction::EditItem.needs_items());
        assert!(ReviewAction::DeleteItem.needs_items());
        assert!(!ReviewAction::AddItem.needs_items());
    }
}
