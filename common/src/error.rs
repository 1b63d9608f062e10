//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// セッション状態遷移のエラー
///
/// `NoFileSelected` だけが利用者の操作で起こり得る。
/// それ以外は画面側の呼び出し誤り。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no receipt image selected")]
    NoFileSelected,

    #[error("an upload is already in progress")]
    SubmitInFlight,

    #[error("the session is reviewing a receipt, not awaiting an upload")]
    NotAwaitingUpload,

    #[error("no receipt is being reviewed")]
    NotReviewing,

    #[error("item index {index} out of range (len {len})")]
    ItemOutOfRange { index: usize, len: usize },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
