//! エラーバナー
//!
//! 最新のエラーのみ表示。閉じるボタンはなく、次の操作で消える

use bisaya_common::AppState;
use leptos::prelude::*;

#[component]
pub fn ErrorBanner(state: RwSignal<AppState>) -> impl IntoView {
    let error = move || state.with(|s| s.error.clone());

    view! {
        <Show when=move || error().is_some()>
            <div class="error-banner" role="alert">
                {move || error().unwrap_or_default()}
            </div>
        </Show>
    }
}
