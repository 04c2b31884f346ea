//! 原文・翻訳結果パネル

use bisaya_common::AppState;
use leptos::prelude::*;

#[component]
pub fn TextPanel<FE, FT>(state: RwSignal<AppState>, on_extract: FE, on_translate: FT) -> impl IntoView
where
    FE: Fn(()) + 'static + Clone,
    FT: Fn(()) + 'static + Clone,
{
    let is_extracting = move || state.with(|s| s.is_extracting);
    let is_translating = move || state.with(|s| s.is_translating);

    view! {
        <div class="text-panel">
            <button
                class="btn btn-primary"
                disabled=move || !state.with(|s| s.can_extract())
                on:click=move |_| on_extract(())
            >
                {move || if is_extracting() { "Extracting..." } else { "Extract Text" }}
            </button>

            <div class="form-group">
                <label for="source-text">"English text"</label>
                <textarea
                    id="source-text"
                    rows="6"
                    placeholder="Extracted text appears here, or type your own..."
                    prop:value=move || state.with(|s| s.source_text.clone())
                    on:input=move |ev| {
                        state.update(|s| s.set_source_text(event_target_value(&ev)));
                    }
                ></textarea>
            </div>

            <button
                class="btn btn-primary"
                disabled=move || !state.with(|s| s.can_translate())
                on:click=move |_| on_translate(())
            >
                {move || if is_translating() { "Translating..." } else { "Translate to Bisaya" }}
            </button>

            <div class="form-group">
                <label for="translated-text">"Bisaya translation"</label>
                <textarea
                    id="translated-text"
                    rows="6"
                    readonly=true
                    prop:value=move || state.with(|s| s.translated_text.clone())
                ></textarea>
            </div>
        </div>
    }
}
