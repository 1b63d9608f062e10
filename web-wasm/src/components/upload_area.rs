//! アップロードフォームコンポーネント

use leptos::prelude::*;
use web_sys::{Event, File, HtmlInputElement};
use crate::app::SessionSignal;

#[component]
pub fn UploadArea<FS, FU>(
    session: SessionSignal,
    on_file_selected: FS,
    on_upload: FU,
) -> impl IntoView
where
    FS: Fn(File) + 'static + Clone,
    FU: Fn(()) + 'static + Clone,
{
    let is_loading = move || session.with(|s| s.is_loading());
    let error_message = move || session.with(|s| s.error_message().map(str::to_string));
    let selected_name = move || {
        session.with(|s| {
            s.upload_form()
                .and_then(|form| form.selected_file.as_ref())
                .map(|file| file.name())
        })
    };

    let on_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        // 1枚のみ（複数選択されても先頭だけ使う）
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file_selected(file);
        }
    };

    view! {
        <div class="upload-area">
            <label class="file-label">
                <input type="file" accept="image/*" on:change=on_change />
                <span>{move || selected_name().unwrap_or_else(|| "画像を選択".to_string())}</span>
            </label>

            <button
                class="btn btn-primary"
                disabled=is_loading
                on:click=move |_| on_upload(())
            >
                {move || if is_loading() { "Processing..." } else { "Process Receipt" }}
            </button>

            {move || error_message().map(|message| view! {
                <p class="error-message">{message}</p>
            })}
        </div>
    }
}
