//! レシート確認・編集コンポーネント

use leptos::prelude::*;
use receipt_itemizer_common::ItemField;
use crate::app::SessionSignal;

#[component]
pub fn ReviewPanel(session: SessionSignal) -> impl IntoView {
    let image_url = move || session.with(|s| s.image_url().unwrap_or_default().to_string());
    let vendor = move || {
        session.with(|s| s.receipt().map(|r| r.vendor.clone()).unwrap_or_default())
    };
    let item_count = move || session.with(|s| s.receipt().map(|r| r.items.len()).unwrap_or(0));

    let on_add_item = move |_: web_sys::MouseEvent| {
        session.update(|s| {
            if let Err(e) = s.add_item() {
                gloo::console::warn!(e.to_string());
            }
        });
    };

    view! {
        <div class="review-panel">
            <div class="receipt-image">
                <img src=image_url alt="Receipt" />
            </div>

            <div class="receipt-details">
                <label class="vendor-field">
                    "Vendor"
                    <input
                        type="text"
                        prop:value=vendor
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            session.update(|s| {
                                if let Err(e) = s.set_vendor_name(value) {
                                    gloo::console::warn!(e.to_string());
                                }
                            });
                        }
                    />
                </label>

                <table class="item-table">
                    <thead>
                        <tr>
                            {ItemField::ALL.into_iter().map(|field| view! { <th>{field.label()}</th> }).collect_view()}
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        // 行は位置で識別する（削除後は後ろの行が詰まる）
                        <For
                            each=move || 0..item_count()
                            key=|index| *index
                            children=move |index| view! { <ItemRow session=session index=index /> }
                        />
                    </tbody>
                </table>

                <button class="btn btn-secondary" on:click=on_add_item>"+ Add Item"</button>
            </div>
        </div>
    }
}

#[component]
fn ItemRow(session: SessionSignal, index: usize) -> impl IntoView {
    let cell = move |field: ItemField| {
        let value = move || {
            session.with(|s| {
                s.receipt()
                    .and_then(|r| r.items.get(index))
                    .map(|item| item.field(field).to_string())
                    .unwrap_or_default()
            })
        };
        view! {
            <td>
                <input
                    type="text"
                    class=format!("item-{}", field.key())
                    placeholder=field.label()
                    prop:value=value
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        session.update(|s| {
                            if let Err(e) = s.edit_item(index, field, value) {
                                gloo::console::warn!(e.to_string());
                            }
                        });
                    }
                />
            </td>
        }
    };

    let on_delete = move |_: web_sys::MouseEvent| {
        session.update(|s| {
            if let Err(e) = s.delete_item(index) {
                gloo::console::warn!(e.to_string());
            }
        });
    };

    view! {
        <tr>
            {ItemField::ALL.into_iter().map(cell).collect_view()}
            <td>
                <button class="btn btn-danger" on:click=on_delete>"Delete"</button>
            </td>
        </tr>
    }
}
