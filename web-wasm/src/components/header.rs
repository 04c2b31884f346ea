//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"English → Bisaya Translator"</h1>
            <p class="text-muted">"Upload an image, extract its English text, and translate it to Bisaya."</p>
        </header>
    }
}
