//! レシート抽出API
//!
//! `POST {BACKEND_ORIGIN}/api/process-receipt` に画像を `file` フィールドで送る。

use receipt_itemizer_common::{
    extract_error_message, parse_extraction_response, ExtractionResponse, UploadFailure,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// バックエンドのオリジン（画像URLの前置きにも使う）
pub const BACKEND_ORIGIN: &str = "http://localhost:5000";

const PROCESS_PATH: &str = "/api/process-receipt";

/// 画像を送信して抽出結果を受け取る
///
/// 通信失敗・非2xx・不正なJSONはすべて `UploadFailure` になる。
pub async fn process_receipt(file: File) -> Result<ExtractionResponse, UploadFailure> {
    match post_receipt(&file).await {
        Ok(outcome) => outcome,
        Err(e) => {
            gloo::console::error!("receipt upload failed:", e);
            Err(UploadFailure::default())
        }
    }
}

/// 外側の `Err` は fetch 自体の失敗
async fn post_receipt(file: &File) -> Result<Result<ExtractionResponse, UploadFailure>, JsValue> {
    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", file, &file.name())?;

    // Content-Type はブラウザが boundary 付きで設定する
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let url = format!("{}{}", BACKEND_ORIGIN, PROCESS_PATH);
    let request = Request::new_with_str_and_init(&url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let body = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .unwrap_or_default();

    if !resp.ok() {
        gloo::console::warn!(format!("API error: {}", resp.status()));
    }
    let outcome = read_response(resp.ok(), &body);
    if resp.ok() && outcome.is_err() {
        gloo::console::error!("invalid response body");
    }
    Ok(outcome)
}

/// 応答ボディを抽出結果または `UploadFailure` に変換
///
/// 非2xxは `{ "error": ... }` のテキストのみ拾い、2xxでもJSONが不正なら失敗。
fn read_response(ok: bool, body: &str) -> Result<ExtractionResponse, UploadFailure> {
    if !ok {
        return Err(UploadFailure {
            server_message: extract_error_message(body),
        });
    }
    parse_extraction_response(body).map_err(|_| UploadFailure::default())
}
