//! フォルダ一括処理
//!
//! 画像を1枚ずつ送信し、成功したものはCSVを書き出す。
//! 失敗しても残りの画像は続けて処理し、最後に結果をJSONで保存する。

use crate::error::{ItemizerError, Result};
use crate::export::{csv, ExportOptions};
use crate::extractor::{submit_receipt, HttpExtractor, ReceiptFile};
use crate::scanner::{self, ImageInfo};
use receipt_itemizer_common::{LineItem, Session};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// 1枚分の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BatchEntry {
    Exported {
        file_name: String,
        vendor: String,
        items: Vec<LineItem>,
        csv_path: PathBuf,
    },
    Failed {
        file_name: String,
        message: String,
    },
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub entries: Vec<BatchEntry>,
    /// 保存した結果JSONのパス
    #[serde(skip)]
    pub report_path: Option<PathBuf>,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, BatchEntry::Exported { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }
}

pub async fn run_batch(
    folder: &Path,
    recursive: bool,
    extractor: &HttpExtractor,
    options: &ExportOptions,
) -> Result<BatchSummary> {
    let images = scanner::scan_folder(folder, recursive)?;
    if images.is_empty() {
        return Err(ItemizerError::NoImagesFound(folder.display().to_string()));
    }

    let mut summary = BatchSummary::default();
    let total = images.len();

    for (i, image) in images.iter().enumerate() {
        println!("[{}/{}] {}", i + 1, total, image.file_name);
        let entry = process_image(image, extractor, options).await?;

        match &entry {
            BatchEntry::Exported { items, csv_path, .. } => {
                println!("  ✔ {}件 → {}", items.len(), csv_path.display());
            }
            BatchEntry::Failed { message, .. } => {
                println!("  ✗ {}", message);
            }
        }
        summary.entries.push(entry);
    }

    // CSVは出力済みなので保存失敗は警告に留める
    match save_summary(&summary, &options.output_dir, csv::now_millis()) {
        Ok(path) => {
            println!("結果を保存: {}", path.display());
            summary.report_path = Some(path);
        }
        Err(e) => tracing::warn!(error = %e, "failed to save batch results"),
    }

    Ok(summary)
}

/// 結果を `batch_results_<エポックミリ秒>.json` として保存
pub fn save_summary(summary: &BatchSummary, output_dir: &Path, timestamp_ms: i64) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("batch_results_{}.json", timestamp_ms));
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(&path, json)?;
    tracing::debug!(path = %path.display(), entries = summary.entries.len(), "batch results saved");
    Ok(path)
}

/// 画像ごとに新しいセッションで送信
///
/// 送信失敗・CSV書き出し失敗は `Failed` として記録し、
/// それ以外（セッション状態の不整合など）は呼び出し元へ返す
async fn process_image(
    image: &ImageInfo,
    extractor: &HttpExtractor,
    options: &ExportOptions,
) -> Result<BatchEntry> {
    let file = match ReceiptFile::open(&image.path) {
        Ok(file) => file,
        Err(e) => {
            return Ok(BatchEntry::Failed {
                file_name: image.file_name.clone(),
                message: e.to_string(),
            })
        }
    };

    let mut session = Session::new();
    session.select_file(file)?;

    match submit_receipt(&mut session, extractor, false).await {
        Ok(()) => {}
        Err(ItemizerError::Extraction { message }) => {
            return Ok(BatchEntry::Failed {
                file_name: image.file_name.clone(),
                message,
            })
        }
        Err(e) => return Err(e),
    }

    let Some(receipt) = session.receipt() else {
        return Ok(BatchEntry::Failed {
            file_name: image.file_name.clone(),
            message: receipt_itemizer_common::GENERIC_FAILURE_MESSAGE.to_string(),
        });
    };

    match csv::write_csv(receipt, &options.output_dir, options.escaping, csv::now_millis()) {
        Ok(csv_path) => Ok(BatchEntry::Exported {
            file_name: image.file_name.clone(),
            vendor: receipt.vendor.clone(),
            items: receipt.items.clone(),
            csv_path,
        }),
        Err(e) => {
            tracing::warn!(file = %image.file_name, error = %e, "csv export failed");
            Ok(BatchEntry::Failed {
                file_name: image.file_name.clone(),
                message: e.to_string(),
            })
        }
    }
}
