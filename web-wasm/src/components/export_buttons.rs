//! エクスポートボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn ExportButtons<FC, FT, FN>(
    on_export_csv: FC,
    on_copy: FT,
    on_new_receipt: FN,
) -> impl IntoView
where
    FC: Fn(()) + 'static + Clone,
    FT: Fn(()) + 'static + Clone,
    FN: Fn(()) + 'static + Clone,
{
    view! {
        <div class="export-buttons">
            <button
                class="btn btn-primary"
                on:click={
                    let on_export_csv = on_export_csv.clone();
                    move |_| on_export_csv(())
                }
            >
                "Export to CSV"
            </button>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_copy = on_copy.clone();
                    move |_| on_copy(())
                }
            >
                "Copy to Clipboard"
            </button>

            <button
                class="btn btn-secondary"
                on:click={
                    let on_new_receipt = on_new_receipt.clone();
                    move |_| on_new_receipt(())
                }
            >
                "New Receipt"
            </button>
        </div>
    }
}
