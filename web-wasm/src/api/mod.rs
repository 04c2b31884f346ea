//! 外部API連携

pub mod gemini;

use wasm_bindgen::{JsCast, JsValue};

/// JsValueのエラーを表示用文字列にする
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
