//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use leptos::task::spawn_local;
use receipt_itemizer_common::Session;
use web_sys::File;
use crate::api::backend::{process_receipt, BACKEND_ORIGIN};
use crate::components::{
    export_buttons::ExportButtons,
    header::Header,
    review_panel::ReviewPanel,
    upload_area::UploadArea,
};
use crate::export::{clipboard::copy_receipt_text, download::download_receipt_csv};

/// セッション状態（`File` は Send でないためローカル保持）
pub type SessionSignal = RwSignal<Session<File>, LocalStorage>;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let session: SessionSignal = RwSignal::new_local(Session::new());
    // エクスポート失敗の通知
    let (notice, set_notice) = signal(None::<String>);

    let on_file_selected = move |file: File| {
        session.update(|s| {
            if let Err(e) = s.select_file(file) {
                gloo::console::warn!(e.to_string());
            }
        });
    };

    // アップロード開始ハンドラ
    let on_upload = move |_: ()| {
        let mut started = None;
        session.update(|s| started = s.begin_submit().ok());
        let Some(file) = started else {
            return;
        };

        spawn_local(async move {
            let outcome = process_receipt(file).await;
            session.update(|s| {
                if let Err(e) = s.finish_submit(outcome, BACKEND_ORIGIN) {
                    gloo::console::warn!(e.to_string());
                }
            });
        });
    };

    // CSV出力ハンドラ
    let on_export_csv = move |_: ()| {
        let result = session.with(|s| s.receipt().map(download_receipt_csv));
        match result {
            Some(Ok(file_name)) => {
                gloo::console::log!(format!("CSV exported: {}", file_name));
                set_notice.set(None);
            }
            Some(Err(e)) => {
                gloo::console::error!("CSV export failed:", e);
                set_notice.set(Some("Could not export CSV".to_string()));
            }
            None => {}
        }
    };

    // クリップボードコピーハンドラ
    let on_copy = move |_: ()| {
        let Some(receipt) = session.with(|s| s.receipt().cloned()) else {
            return;
        };
        spawn_local(async move {
            match copy_receipt_text(&receipt).await {
                Ok(()) => {
                    set_notice.set(None);
                    gloo::dialogs::alert("Copied to clipboard!");
                }
                Err(message) => {
                    gloo::console::error!(message.clone());
                    set_notice.set(Some(message));
                }
            }
        });
    };

    // 新しいレシート
    let on_new_receipt = move |_: ()| {
        session.update(|s| s.reset());
        set_notice.set(None);
    };

    view! {
        <div class="container">
            <Header />

            <Show
                when=move || session.with(|s| s.is_reviewing())
                fallback=move || view! {
                    <UploadArea
                        session=session
                        on_file_selected=on_file_selected
                        on_upload=on_upload
                    />
                }
            >
                <ReviewPanel session=session />

                <ExportButtons
                    on_export_csv=on_export_csv
                    on_copy=on_copy
                    on_new_receipt=on_new_receipt
                />

                {move || notice.get().map(|message| view! {
                    <p class="error-message">{message}</p>
                })}
            </Show>
        </div>
    }
}
