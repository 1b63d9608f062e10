//! CSVファイルのダウンロード

use gloo::file::{Blob, ObjectUrl};
use receipt_itemizer_common::{csv_file_name, render_csv, FieldEscaping, Receipt};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAnchorElement;

/// レシートをCSVにして `receipt_<店名>_<時刻>.csv` としてダウンロードさせる
pub fn download_receipt_csv(receipt: &Receipt) -> Result<String, JsValue> {
    let csv = render_csv(&receipt.vendor, &receipt.items, FieldEscaping::Verbatim);
    let file_name = csv_file_name(&receipt.vendor, js_sys::Date::now() as i64);
    trigger_download(&file_name, &csv, "text/csv")?;
    Ok(file_name)
}

/// 一時的な `<a download>` をクリックする
///
/// `ObjectUrl` はこの関数を抜けると revoke される。
fn trigger_download(file_name: &str, content: &str, mime_type: &str) -> Result<(), JsValue> {
    let blob = Blob::new_with_options(content, Some(mime_type));
    let url = ObjectUrl::from(blob);

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Ok(())
}
