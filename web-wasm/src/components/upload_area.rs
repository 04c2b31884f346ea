//! アップロードエリアコンポーネント
//!
//! 画像1枚を選択し、プレビューを表示する

use bisaya_common::{is_image_mime_type, AppState, SelectedImage};
use leptos::html::Input;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileReader, HtmlInputElement, Url};

use crate::api::js_error_message;

#[component]
pub fn UploadArea<F>(state: RwSignal<AppState>, on_image_loaded: F) -> impl IntoView
where
    F: Fn(SelectedImage) + 'static + Clone,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();

    let on_change = {
        let on_image_loaded = on_image_loaded.clone();
        move |ev: web_sys::Event| {
            let input: HtmlInputElement = event_target(&ev);
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                if is_image_mime_type(&file.type_()) {
                    read_file(file, state, on_image_loaded.clone());
                } else {
                    gloo::console::warn!(format!("画像ではないファイルを無視: {}", file.name()));
                }
            }
            // 同じファイルを選び直せるように
            input.set_value("");
        }
    };

    let on_drop = {
        let on_image_loaded = on_image_loaded.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                if is_image_mime_type(&file.type_()) {
                    read_file(file, state, on_image_loaded.clone());
                } else {
                    gloo::console::warn!(format!("画像ではないファイルを無視: {}", file.name()));
                }
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_remove = move |_| {
        if let Some(url) = state.try_update(|s| s.clear_image()).flatten() {
            let _ = Url::revoke_object_url(&url);
        }
    };

    let preview_url = move || state.with(|s| s.image.as_ref().map(|i| i.preview_url.clone()));
    let file_name = move || {
        state.with(|s| s.image.as_ref().map(|i| i.file_name.clone()).unwrap_or_default())
    };

    view! {
        <div class="upload-section">
            <input
                type="file"
                accept="image/*"
                class="hidden-input"
                node_ref=input_ref
                on:change=on_change
            />
            <div
                class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <div class="upload-icon">"🖼"</div>
                <p>"Drag & drop an image or click to choose one"</p>
            </div>

            <Show when=move || preview_url().is_some()>
                <figure class="image-preview">
                    <img src=move || preview_url().unwrap_or_default() alt="Uploaded image preview" />
                    <figcaption>{file_name}</figcaption>
                    <button class="btn btn-tertiary btn-small" on:click=on_remove>
                        "Remove image"
                    </button>
                </figure>
            </Show>
        </div>
    }
}

/// ファイルをData URLとして読み込む
///
/// プレビュー用にObject URLも作る（差し替え時に呼び出し側で解放する）。
/// 読み込みに失敗したらエラーバナーに表示する
fn read_file<F>(file: File, state: RwSignal<AppState>, on_image_loaded: F)
where
    F: Fn(SelectedImage) + 'static,
{
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            state.update(|s| s.fail_image_read(&js_error_message(&e)));
            return;
        }
    };

    let file_name = file.name();
    let preview_url = Url::create_object_url_with_blob(&file).unwrap_or_default();

    let onload = {
        let reader = reader.clone();
        let preview_url = preview_url.clone();
        Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            let data_url = reader.result().ok().and_then(|r| r.as_string());
            let image = data_url
                .and_then(|url| SelectedImage::from_data_url(&file_name, &url, preview_url.clone()));

            match image {
                Some(image) => on_image_loaded(image),
                None => {
                    let _ = Url::revoke_object_url(&preview_url);
                    state.update(|s| s.fail_image_read(&file_name));
                }
            }
        }) as Box<dyn FnMut(_)>)
    };

    let onerror = {
        let reader = reader.clone();
        let preview_url = preview_url.clone();
        Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
            let detail = reader
                .error()
                .map(|e| e.message())
                .unwrap_or_default();
            let _ = Url::revoke_object_url(&preview_url);
            state.update(|s| s.fail_image_read(&detail));
        }) as Box<dyn FnMut(_)>)
    };

    reader.set_onload(Some(onload.as_ref().unchecked_ref()));
    reader.set_onerror(Some(onerror.as_ref().unchecked_ref()));
    onload.forget();
    onerror.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        let _ = Url::revoke_object_url(&preview_url);
        state.update(|s| s.fail_image_read(&js_error_message(&e)));
    }
}
