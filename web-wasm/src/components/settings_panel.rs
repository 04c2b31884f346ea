//! 設定パネルコンポーネント

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(api_key: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-key">"Gemini API Key"</label>
                <input
                    type="password"
                    id="api-key"
                    placeholder="Enter your API key..."
                    prop:value=move || api_key.get()
                    on:input=move |ev| {
                        api_key.set(event_target_value(&ev));
                    }
                />
                <a
                    href="https://aistudio.google.com/app/apikey"
                    target="_blank"
                    rel="noopener noreferrer"
                    class="api-key-link"
                >
                    "Get an API key →"
                </a>
                <Show when=move || api_key.with(|k| k.trim().is_empty())>
                    <p class="text-muted">"Requests will fail until an API key is set."</p>
                </Show>
            </div>
        </div>
    }
}
