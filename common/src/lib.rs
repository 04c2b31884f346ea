//! Bisaya Translator Common Library
//!
//! CLIとWeb(WASM)で共有される状態遷移・プロンプト・Gemini API型

pub mod client;
pub mod dictionary;
pub mod error;
pub mod gemini;
pub mod prompts;
pub mod state;
pub mod types;

pub use client::{extract, translate};
pub use dictionary::{Dictionary, KeyValueStore, MemoryStore, STORAGE_KEY};
pub use error::{Error, Result};
pub use gemini::{
    extract_base64_from_data_url, extract_mime_type_from_data_url, GeminiConfig, GeminiRequest,
    GeminiResponse, GenerativeModel,
};
pub use prompts::{build_translation_prompt, EXTRACTION_PROMPT};
pub use state::{AppState, ExtractionJob, TranslationJob};
pub use types::{is_image_mime_type, CustomTranslation, SelectedImage};
