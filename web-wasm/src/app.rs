//! メインアプリケーションコンポーネント
//!
//! 画面状態は AppState 1つにまとめ、操作ごとに状態遷移メソッドを呼ぶ。
//! 外部呼び出しは spawn_local で行い、完了時に結果を書き戻す

use bisaya_common::{AppState, Dictionary, GeminiConfig, GenerativeModel, SelectedImage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::Url;

use crate::api::gemini::FetchModel;
use crate::components::{
    dictionary_panel::DictionaryPanel, error_banner::ErrorBanner, header::Header,
    settings_panel::SettingsPanel, text_panel::TextPanel, upload_area::UploadArea,
};
use crate::storage::BrowserStore;

/// ビルド時に埋め込むAPIキー
const BUILD_API_KEY: Option<&str> = option_env!("GEMINI_API_KEY");

#[component]
pub fn App() -> impl IntoView {
    let state = RwSignal::new(AppState::new());
    let dictionary = RwSignal::new(Dictionary::load_with(BrowserStore, |e| {
        gloo::console::warn!(format!("Failed to load custom translations: {}", e));
    }));
    let api_key = RwSignal::new(BUILD_API_KEY.unwrap_or_default().to_string());

    let gemini_config = move || GeminiConfig::new(api_key.get_untracked());

    // 画像選択ハンドラ
    let on_image_loaded = move |image: SelectedImage| {
        let previous = state.try_update(|s| s.select_image(image)).flatten();
        if let Some(url) = previous {
            let _ = Url::revoke_object_url(&url);
        }
    };

    // テキスト抽出ハンドラ
    let on_extract = move |_| {
        let Some(Ok(job)) = state.try_update(|s| s.begin_extraction()) else {
            return;
        };
        let config = gemini_config();

        spawn_local(async move {
            let model = FetchModel::new(config.clone());
            let request = config.extraction_request(&job.image);
            let result = model.generate(&config.vision_model, &request).await;
            state.update(|s| {
                s.complete_extraction(job.seq, result);
            });
        });
    };

    // 翻訳ハンドラ
    let on_translate = move |_| {
        let job = dictionary.with_untracked(|d| state.try_update(|s| s.begin_translation(d)));
        let Some(Ok(job)) = job else {
            return;
        };
        let config = gemini_config();

        spawn_local(async move {
            let model = FetchModel::new(config.clone());
            let request = config.translation_request(&job.prompt);
            let result = model.generate(&config.text_model, &request).await;
            state.update(|s| {
                s.complete_translation(job.seq, result);
            });
        });
    };

    // 辞書追加ハンドラ
    let on_add_rule = move |_| {
        if let Some((english, bisaya)) = state.try_update(|s| s.take_dictionary_input()).flatten() {
            dictionary.update(|d| {
                d.add(&english, &bisaya);
            });
        }
    };

    view! {
        <div class="container">
            <Header />

            <SettingsPanel api_key=api_key />

            <ErrorBanner state=state />

            <UploadArea state=state on_image_loaded=on_image_loaded />

            <TextPanel state=state on_extract=on_extract on_translate=on_translate />

            <DictionaryPanel state=state dictionary=dictionary on_add=on_add_rule />
        </div>
    }
}
