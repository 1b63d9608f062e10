use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "receipt-itemizer")]
#[command(about = "レシート画像から明細を抽出・編集してCSV/クリップボードに出力", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レシート画像を送信し、明細を確認・編集して出力
    Process {
        /// レシート画像のパス
        #[arg(required = true)]
        image: PathBuf,

        /// CSV出力先フォルダ（デフォルト: 設定値またはカレント）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 確認・編集を省略してすぐ出力
        #[arg(long)]
        no_review: bool,

        /// --no-review 時の出力形式 (csv/clipboard/both)
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// 区切り文字を含む値をエスケープ
        #[arg(long)]
        escape: bool,
    },

    /// フォルダ内のレシート画像を一括処理してCSVを出力
    Batch {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long)]
        recursive: bool,

        /// CSV出力先フォルダ（デフォルト: 設定値またはカレント）
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 区切り文字を含む値をエスケープ
        #[arg(long)]
        escape: bool,
    },

    /// 設定を表示/編集
    Config {
        /// バックエンドのオリジンを設定（例: http://localhost:5000）
        #[arg(long)]
        set_backend: Option<String>,

        /// 既定のCSV出力先を設定
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// 既定でエスケープするか (true/false)
        #[arg(long)]
        set_escape: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Clipboard,
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "clipboard" | "clip" | "text" => Ok(ExportFormat::Clipboard),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use csv, clipboard, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Clipboard => write!(f, "clipboard"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
