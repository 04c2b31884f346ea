//! Gemini API連携（fetch）
//!
//! ブラウザのfetchで generateContent を1回呼び出す。
//! タイムアウト・リトライはしない

use async_trait::async_trait;
use bisaya_common::gemini::api_error_message;
use bisaya_common::{Error, GeminiConfig, GeminiRequest, GeminiResponse, GenerativeModel, Result};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::js_error_message;

pub struct FetchModel {
    config: GeminiConfig,
}

impl FetchModel {
    pub fn new(config: GeminiConfig) -> Self {
        Self { config }
    }

    async fn post(&self, model: &str, request: &GeminiRequest) -> std::result::Result<String, JsValue> {
        let url = self.config.request_url(model);
        let body = serde_json::to_string(request).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&url, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            let text = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();
            return Err(JsValue::from_str(&api_error_message(resp.status(), &text)));
        }

        let json = JsFuture::from(resp.json()?).await?;
        let response: GeminiResponse = serde_wasm_bindgen::from_value(json)?;
        response.text().map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

#[async_trait(?Send)]
impl GenerativeModel for FetchModel {
    async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<String> {
        self.post(model, request)
            .await
            .map_err(|e| Error::Api(js_error_message(&e)))
    }
}
