//! 共有データ型
//!
//! CLIとWeb(WASM)で共有される型:
//! - CustomTranslation: 英語→ビサヤ語の置換ルール
//! - SelectedImage: 抽出対象の画像ペイロード

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::gemini::{extract_base64_from_data_url, extract_mime_type_from_data_url};

/// ユーザー定義の翻訳ルール
///
/// 一覧内の位置で識別する。`english` の重複は許容され、
/// 競合の解決はモデル側のプロンプト解釈に委ねられる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomTranslation {
    pub english: String,
    pub bisaya: String,
}

impl CustomTranslation {
    /// 両フィールドをtrimして生成。どちらかが空なら None
    pub fn new(english: &str, bisaya: &str) -> Option<Self> {
        let english = english.trim();
        let bisaya = bisaya.trim();
        if english.is_empty() || bisaya.is_empty() {
            return None;
        }
        Some(Self {
            english: english.to_string(),
            bisaya: bisaya.to_string(),
        })
    }
}

/// 画像として受け付けるMIMEタイプか（"image/*"）
pub fn is_image_mime_type(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with("image/")
}

/// 選択中の画像
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime_type: String,
    /// Base64エンコード済みの画像データ
    pub data: String,
    /// 表示用URL（ブラウザではObject URL、CLIではファイルパス）
    pub preview_url: String,
}

impl SelectedImage {
    /// "data:image/png;base64,..." 形式のData URLから生成
    pub fn from_data_url(file_name: &str, data_url: &str, preview_url: String) -> Option<Self> {
        let data = extract_base64_from_data_url(data_url)?;
        if data.is_empty() {
            return None;
        }
        Some(Self {
            file_name: file_name.to_string(),
            mime_type: extract_mime_type_from_data_url(data_url).to_string(),
            data: data.to_string(),
            preview_url,
        })
    }

    /// 生バイト列から生成
    pub fn from_bytes(file_name: &str, mime_type: &str, bytes: &[u8], preview_url: String) -> Self {
        Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
            preview_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_translation_trims_fields() {
        let rule = CustomTranslation::new("  church ", "\tiglesya\n").unwrap();
        assert_eq!(rule.english, "church");
        assert_eq!(rule.bisaya, "iglesya");
    }

    #[test]
    fn test_custom_translation_rejects_blank_fields() {
        assert!(CustomTranslation::new("", "iglesya").is_none());
        assert!(CustomTranslation::new("church", "   ").is_none());
        assert!(CustomTranslation::new(" ", " ").is_none());
    }

    #[test]
    fn test_custom_translation_json_shape() {
        let rule = CustomTranslation::new("church", "iglesya").unwrap();
        let json = serde_json::to_string(&rule).unwrap();
        assert_eq!(json, r#"{"english":"church","bisaya":"iglesya"}"#);
    }

    #[test]
    fn test_selected_image_from_data_url() {
        let image = SelectedImage::from_data_url(
            "sign.png",
            "data:image/png;base64,iVBORw0KGgo=",
            "blob:http://localhost/1".to_string(),
        )
        .unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
        assert_eq!(image.preview_url, "blob:http://localhost/1");
    }

    #[test]
    fn test_selected_image_from_invalid_data_url() {
        assert!(SelectedImage::from_data_url("x.png", "not a data url", String::new()).is_none());
        assert!(SelectedImage::from_data_url("x.png", "data:image/png;base64,", String::new()).is_none());
    }

    #[test]
    fn test_is_image_mime_type() {
        assert!(is_image_mime_type("image/png"));
        assert!(is_image_mime_type("IMAGE/JPEG"));
        assert!(!is_image_mime_type("application/pdf"));
        assert!(!is_image_mime_type("text/plain"));
        // ブラウザが種類を判定できなかったファイル
        assert!(!is_image_mime_type(""));
    }

    #[test]
    fn test_selected_image_from_bytes_encodes_base64() {
        let image = SelectedImage::from_bytes("a.jpg", "image/jpeg", b"hello", "a.jpg".to_string());
        assert_eq!(image.data, "aGVsbG8=");
        assert_eq!(image.mime_type, "image/jpeg");
    }
}
