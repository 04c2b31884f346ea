//! カスタム翻訳辞書パネル
//!
//! 追加フォームと登録済みルールの一覧（行ごとの削除ボタン付き）

use bisaya_common::{AppState, Dictionary};
use leptos::prelude::*;

use crate::storage::BrowserStore;

#[component]
pub fn DictionaryPanel<FA>(
    state: RwSignal<AppState>,
    dictionary: RwSignal<Dictionary<BrowserStore>>,
    on_add: FA,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone,
{
    let rows = move || {
        dictionary.with(|d| d.entries().iter().cloned().enumerate().collect::<Vec<_>>())
    };

    view! {
        <div class="dictionary-panel">
            <h2>"Custom Translations"</h2>
            <p class="text-muted">
                "These pairs are added to the translation prompt. The model is asked to follow them, but this is not verified."
            </p>

            <form
                class="dictionary-form"
                on:submit=move |ev| {
                    ev.prevent_default();
                    on_add(());
                }
            >
                <input
                    type="text"
                    placeholder="English"
                    prop:value=move || state.with(|s| s.new_english.clone())
                    on:input=move |ev| {
                        state.update(|s| s.set_new_english(event_target_value(&ev)));
                    }
                />
                <input
                    type="text"
                    placeholder="Bisaya"
                    prop:value=move || state.with(|s| s.new_bisaya.clone())
                    on:input=move |ev| {
                        state.update(|s| s.set_new_bisaya(event_target_value(&ev)));
                    }
                />
                <button type="submit" class="btn btn-secondary">"Add"</button>
            </form>

            <ul class="dictionary-list">
                <For
                    each=rows
                    key=|(i, rule)| (*i, rule.clone())
                    children=move |(i, rule)| {
                        view! {
                            <li>
                                <span class="rule-english">{rule.english}</span>
                                " → "
                                <span class="rule-bisaya">{rule.bisaya}</span>
                                <button
                                    class="btn btn-tertiary btn-small"
                                    on:click=move |_| {
                                        dictionary.update(|d| {
                                            d.remove(i);
                                        });
                                    }
                                >
                                    "Delete"
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
