use receipt_itemizer_common::SessionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItemizerError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    /// アップロード失敗（画面に出すメッセージそのもの）
    #[error("{message}")]
    Extraction { message: String },

    #[error("HTTPクライアントエラー: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("クリップボードに書き込めません: {0}")]
    Clipboard(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] receipt_itemizer_common::Error),

    #[error("状態エラー: {0}")]
    Session(#[from] SessionError),
}

impl From<dialoguer::Error> for ItemizerError {
    fn from(e: dialoguer::Error) -> Self {
        ItemizerError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ItemizerError>;
