//! クリップボード書き込み（navigator.clipboard）

use receipt_itemizer_common::{render_clipboard_text, FieldEscaping, Receipt};
use wasm_bindgen_futures::JsFuture;

/// タブ区切りテキストをクリップボードへ
pub async fn copy_receipt_text(receipt: &Receipt) -> Result<(), String> {
    let text = render_clipboard_text(&receipt.vendor, &receipt.items, FieldEscaping::Verbatim);

    // 非セキュアコンテキストでは clipboard が無い
    let clipboard = web_sys::window()
        .and_then(|window| window.navigator().clipboard())
        .ok_or_else(|| "Could not copy to clipboard: clipboard unavailable".to_string())?;

    JsFuture::from(clipboard.write_text(&text))
        .await
        .map(|_| ())
        .map_err(|e| format!("Could not copy to clipboard: {:?}", e))
}
