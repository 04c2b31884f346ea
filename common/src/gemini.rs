//! Gemini API連携の共通部分
//!
//! - リクエスト/レスポンスのワイヤ型
//! - 接続設定（GeminiConfig）
//! - 送信手段を抽象化した GenerativeModel トレイト
//!
//! 実際の送信はCLI（reqwest）とWeb（fetch）がそれぞれ実装する

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompts::EXTRACTION_PROMPT;
use crate::types::SelectedImage;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_VISION_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GeminiResponse {
    /// 先頭候補のテキストパートを連結して返す（加工しない）
    pub fn text(&self) -> Result<String> {
        let parts = self
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default();

        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            return Err(Error::Api("Empty response from model".to_string()));
        }
        Ok(texts.concat())
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// 非2xxレスポンスのエラーメッセージを組み立てる
///
/// Gemini形式のエラーJSON（`{"error": {"message": ...}}`）ならそのメッセージを使う
pub fn api_error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        format!("API error {status}")
    } else {
        format!("API error {status}: {detail}")
    }
}

/// Gemini接続設定
///
/// APIキーは構築時に明示的に渡す。環境変数の読み取りは呼び出し側の責務
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub vision_model: String,
    pub text_model: String,
    pub base_url: String,
    pub temperature: Option<f32>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: None,
        }
    }

    /// generateContentエンドポイント（APIキーなし、ログ出力用）
    pub fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// APIキー付きのリクエストURL
    pub fn request_url(&self, model: &str) -> String {
        format!("{}?key={}", self.endpoint(model), self.api_key)
    }

    fn generation_config(&self) -> Option<GenerationConfig> {
        self.temperature.map(|temperature| GenerationConfig { temperature })
    }

    /// テキスト抽出リクエスト（固定指示 + インライン画像）
    pub fn extraction_request(&self, image: &SelectedImage) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_PROMPT.to_string(),
                    },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                ],
            }],
            generation_config: self.generation_config(),
        }
    }

    /// 翻訳リクエスト（テキストのみ、画像なし）
    pub fn translation_request(&self, prompt: &str) -> GeminiRequest {
        GeminiRequest {
            contents: vec![Content {
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation_config(),
        }
    }
}

/// 生成モデル呼び出しの抽象
///
/// 1回のリクエストに対して先頭候補のテキストを返す。リトライはしない。
/// WASMのfetchはSendでないため `?Send`
#[async_trait(?Send)]
pub trait GenerativeModel {
    async fn generate(&self, model: &str, request: &GeminiRequest) -> Result<String>;
}

/// Data URLからBase64データ部分を抽出
///
/// # Arguments
/// * `data_url` - "data:image/jpeg;base64,/9j/4AAQ..." 形式のData URL
///
/// # Returns
/// Base64エンコードされたデータ部分、または抽出失敗時はNone
pub fn extract_base64_from_data_url(data_url: &str) -> Option<&str> {
    data_url.split(',').nth(1)
}

/// Data URLからMIMEタイプを抽出
///
/// 抽出失敗時は"image/jpeg"をデフォルトとして返す
pub fn extract_mime_type_from_data_url(data_url: &str) -> &str {
    data_url
        .split(':')
        .nth(1)
        .and_then(|s| s.split(';').next())
        .filter(|s| !s.is_empty())
        .unwrap_or("image/jpeg")
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================
    // Data URL抽出テスト
    // =============================================

    #[test]
    fn test_extract_base64_from_data_url_jpeg() {
        let data_url = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        assert_eq!(extract_base64_from_data_url(data_url), Some("/9j/4AAQSkZJRg=="));
    }

    #[test]
    fn test_extract_base64_from_data_url_invalid() {
        assert_eq!(extract_base64_from_data_url("not a data url"), None);
        assert_eq!(extract_base64_from_data_url(""), None);
    }

    #[test]
    fn test_extract_mime_type_webp() {
        assert_eq!(extract_mime_type_from_data_url("data:image/webp;base64,UklGR"), "image/webp");
    }

    #[test]
    fn test_extract_mime_type_default() {
        assert_eq!(extract_mime_type_from_data_url("invalid"), "image/jpeg");
    }

    // =============================================
    // リクエスト/レスポンス
    // =============================================

    fn image() -> SelectedImage {
        SelectedImage {
            file_name: "sign.png".to_string(),
            mime_type: "image/png".to_string(),
            data: "iVBORw0KGgo=".to_string(),
            preview_url: String::new(),
        }
    }

    #[test]
    fn test_extraction_request_shape() {
        let config = GeminiConfig::new("key");
        let request = config.extraction_request(&image());
        let json = serde_json::to_value(&request).unwrap();

        let parts = &json["contents"][0]["parts"];
        assert_eq!(parts.as_array().unwrap().len(), 2);
        assert_eq!(parts[0]["text"], EXTRACTION_PROMPT);
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "iVBORw0KGgo=");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_translation_request_is_single_text_part() {
        let mut config = GeminiConfig::new("key");
        config.temperature = Some(0.2);
        let request = config.translation_request("Translate this");
        let json = serde_json::to_string(&request).unwrap();

        assert_eq!(
            json,
            r#"{"contents":[{"parts":[{"text":"Translate this"}]}],"generationConfig":{"temperature":0.2}}"#
        );
    }

    #[test]
    fn test_endpoint_and_request_url() {
        let mut config = GeminiConfig::new("secret");
        config.base_url = "http://localhost:8080/v1beta/".to_string();
        assert_eq!(
            config.endpoint("gemini-2.0-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
        assert_eq!(
            config.request_url("m"),
            "http://localhost:8080/v1beta/models/m:generateContent?key=secret"
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "Maayong " }, { "text": "buntag" }] }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "Maayong buntag");
    }

    #[test]
    fn test_response_text_is_not_trimmed() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"  Salamat\n"}]}}]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().unwrap(), "  Salamat\n");
    }

    #[test]
    fn test_response_without_candidates_is_error() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = response.text().unwrap_err();
        assert!(matches!(err, Error::Api(_)));
    }

    #[test]
    fn test_api_error_message_uses_gemini_error_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(400, body), "API error 400: API key not valid.");
    }

    #[test]
    fn test_api_error_message_with_plain_body() {
        assert_eq!(api_error_message(502, "Bad Gateway"), "API error 502: Bad Gateway");
        assert_eq!(api_error_message(500, ""), "API error 500");
    }
}
