//! 抽出バックエンド連携モジュール
//!
//! レシート画像を multipart/form-data（フィールド名 `file`）で送信し、
//! 店名・明細・画像パスを受け取る。
//!
//! 失敗はすべて `UploadFailure` に畳み込む。画面に出すのは
//! サーバーの `error` テキストか汎用メッセージのみで、詳細はログへ。

use super::types::ReceiptFile;
use crate::config::Config;
use crate::error::Result;
use receipt_itemizer_common::{
    extract_error_message, parse_extraction_response, ExtractionResponse, UploadFailure,
};
use reqwest::multipart::{Form, Part};
use std::time::Duration;

pub struct HttpExtractor {
    client: reqwest::Client,
    origin: String,
    endpoint: String,
}

impl HttpExtractor {
    pub fn new(origin: &str, process_path: &str, timeout: Duration) -> Result<Self> {
        let origin = origin.trim_end_matches('/').to_string();
        let endpoint = format!("{}{}", origin, process_path);
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            origin,
            endpoint,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.backend_origin,
            &config.process_path,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// 画像URLの前に付けるオリジン
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// レシート画像を送信して抽出結果を受け取る
    pub async fn extract(&self, file: ReceiptFile) -> std::result::Result<ExtractionResponse, UploadFailure> {
        let file_name = file.file_name.clone();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime_type)
            .map_err(|e| {
                tracing::warn!(error = %e, mime = %file.mime_type, "invalid mime type");
                UploadFailure::default()
            })?;
        let form = Form::new().part("file", part);

        tracing::debug!(endpoint = %self.endpoint, file = %file_name, "submitting receipt");

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, endpoint = %self.endpoint, "request failed");
                UploadFailure::default()
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, %status, "failed to read response body");
            UploadFailure::default()
        })?;

        tracing::debug!(%status, bytes = body.len(), "extraction response");

        if !status.is_success() {
            let server_message = extract_error_message(&body);
            tracing::warn!(%status, message = ?server_message, "extraction failed");
            return Err(UploadFailure { server_message });
        }

        parse_extraction_response(&body).map_err(|e| {
            tracing::warn!(error = %e, "unexpected extraction response");
            UploadFailure::default()
        })
    }
}
