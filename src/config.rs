use crate::error::{Result, TranslatorError};
use bisaya_common::gemini::{DEFAULT_BASE_URL, DEFAULT_TEXT_MODEL, DEFAULT_VISION_MODEL};
use bisaya_common::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub vision_model: String,
    pub text_model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
    /// 生成温度（未設定ならモデルの既定値）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            vision_model: DEFAULT_VISION_MODEL.into(),
            text_model: DEFAULT_TEXT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: 120,
            temperature: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 設定ディレクトリ（~/.config/bisaya-translator）
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TranslatorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("bisaya-translator"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// APIキーを解決する（環境変数を優先）
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String> {
        env_value
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|key| !key.trim().is_empty()))
            .ok_or(TranslatorError::MissingApiKey)
    }

    /// Gemini接続設定を組み立てる
    pub fn gemini_config(&self) -> Result<GeminiConfig> {
        let api_key = self.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;
        Ok(self.gemini_config_with_key(api_key))
    }

    pub fn gemini_config_with_key(&self, api_key: String) -> GeminiConfig {
        let mut config = GeminiConfig::new(api_key);
        config.vision_model = self.vision_model.clone();
        config.text_model = self.text_model.clone();
        config.base_url = self.base_url.clone();
        config.temperature = self.temperature;
        config
    }
}
