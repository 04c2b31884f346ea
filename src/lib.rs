//! Bisaya Translator CLI
//!
//! 画像から英語テキストを抽出し、カスタム辞書を反映してビサヤ語へ翻訳する

pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod image_input;
pub mod interactive;
pub mod progress;
pub mod storage;
