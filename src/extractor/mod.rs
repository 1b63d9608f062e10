mod http;
mod types;

pub use http::HttpExtractor;
pub use types::{guess_mime_type, ReceiptFile};

use crate::error::{ItemizerError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use receipt_itemizer_common::{Session, SessionError, NO_FILE_MESSAGE};
use std::time::Duration;

/// 選択中のレシート画像を送信する
///
/// 送信中はスピナーを表示。失敗時はセッションに表示メッセージが残り、
/// 同じメッセージを `ItemizerError::Extraction` として返す。
pub async fn submit_receipt(
    session: &mut Session<ReceiptFile>,
    extractor: &HttpExtractor,
    show_spinner: bool,
) -> Result<()> {
    let spinner = if show_spinner {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Processing...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    } else {
        None
    };

    let result = session
        .submit_with(extractor.origin(), |file| extractor.extract(file))
        .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    match result {
        Err(SessionError::NoFileSelected) => Err(ItemizerError::Extraction {
            message: NO_FILE_MESSAGE.to_string(),
        }),
        Err(e) => Err(e.into()),
        Ok(()) => match session.error_message() {
            Some(message) => Err(ItemizerError::Extraction {
                message: message.to_string(),
            }),
            None => Ok(()),
        },
    }
}
