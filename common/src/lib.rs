//! Receipt Itemizer Common Library
//!
//! CLIとWeb(WASM)で共有される型・セッション状態・エクスポート処理

pub mod types;
pub mod error;
pub mod parser;
pub mod session;
pub mod export;

pub use types::{ErrorBody, ExtractionResponse, ItemField, LineItem};
pub use error::{Error, Result, SessionError};
pub use parser::{extract_error_message, parse_extraction_response};
pub use session::{
    Receipt, Session, UploadFailure, UploadForm, View,
    GENERIC_FAILURE_MESSAGE, NO_FILE_MESSAGE,
};
pub use export::{
    csv_disk_file_name, csv_file_name, render_clipboard_text, render_csv, sanitize_vendor, FieldEscaping,
};
