//! Gemini API クライアント（reqwest）

use async_trait::async_trait;
use bisaya_common::gemini::api_error_message;
use bisaya_common::{Error, GeminiConfig, GeminiRequest, GeminiResponse, GenerativeModel};
use std::time::Duration;

use crate::error::Result;

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, model: &str, request: &GeminiRequest) -> bisaya_common::Result<String> {
        tracing::debug!("POST {}", self.config.endpoint(model));

        let response = self
            .http
            .post(self.config.request_url(model))
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Api(format!("リクエスト送信に失敗: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Gemini error body: {}", body);
            return Err(Error::Api(api_error_message(status.as_u16(), &body)));
        }

        let payload: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::Api(format!("レスポンスの解析に失敗: {}", e.without_url())))?;

        let text = payload.text()?;
        tracing::debug!("Gemini response: {} chars", text.len());
        Ok(text)
    }
}
