//! 画面状態と状態遷移
//!
//! UIの状態を1つの構造体にまとめ、各操作を同期的な遷移メソッドとして定義する。
//! 外部呼び出しは begin_* でジョブを発行し、complete_* で結果を書き戻す。
//!
//! 各出力欄は発行済みリクエストの通し番号を持ち、
//! 古い番号の結果は書き戻さずに捨てる。

use crate::dictionary::{Dictionary, KeyValueStore};
use crate::error::Error;
use crate::prompts::build_translation_prompt;
use crate::types::SelectedImage;

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image first.";
pub const EMPTY_SOURCE_MESSAGE: &str = "Please enter or extract some text to translate.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract text from the image.";
pub const TRANSLATION_FAILED_MESSAGE: &str = "Failed to translate the text.";
pub const IMAGE_READ_FAILED_MESSAGE: &str = "Failed to read the image file.";

/// アプリケーションの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub image: Option<SelectedImage>,
    pub source_text: String,
    pub translated_text: String,
    pub is_extracting: bool,
    pub is_translating: bool,
    pub error: Option<String>,
    /// 辞書追加フォームの入力バッファ
    pub new_english: String,
    pub new_bisaya: String,
    extraction_seq: u64,
    translation_seq: u64,
}

/// 発行済みのテキスト抽出リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionJob {
    pub seq: u64,
    pub image: SelectedImage,
}

/// 発行済みの翻訳リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationJob {
    pub seq: u64,
    pub prompt: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像を選択
    ///
    /// テキストとエラーをクリアし、実行中のリクエストを無効化する。
    /// 差し替え前のプレビューURLを返す（ブラウザ側で解放する）
    pub fn select_image(&mut self, image: SelectedImage) -> Option<String> {
        let previous = self.image.replace(image).map(|i| i.preview_url);
        self.reset_outputs();
        previous
    }

    /// 画像の選択を解除
    pub fn clear_image(&mut self) -> Option<String> {
        let previous = self.image.take().map(|i| i.preview_url);
        self.reset_outputs();
        previous
    }

    /// 画像ファイルの読み込み失敗を表示する
    ///
    /// 選択中の画像とテキストは変更しない
    pub fn fail_image_read(&mut self, detail: &str) {
        tracing::warn!("画像の読み込みに失敗: {}", detail);
        self.error = Some(if detail.trim().is_empty() {
            IMAGE_READ_FAILED_MESSAGE.to_string()
        } else {
            format!("{} ({})", IMAGE_READ_FAILED_MESSAGE, detail)
        });
    }

    fn reset_outputs(&mut self) {
        self.source_text.clear();
        self.translated_text.clear();
        self.error = None;
        self.is_extracting = false;
        self.is_translating = false;
        self.extraction_seq += 1;
        self.translation_seq += 1;
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
    }

    pub fn set_new_english(&mut self, text: impl Into<String>) {
        self.new_english = text.into();
    }

    pub fn set_new_bisaya(&mut self, text: impl Into<String>) {
        self.new_bisaya = text.into();
    }

    /// 抽出ボタンの有効判定
    pub fn can_extract(&self) -> bool {
        self.image.is_some() && !self.is_extracting
    }

    /// 翻訳ボタンの有効判定
    pub fn can_translate(&self) -> bool {
        !self.source_text.trim().is_empty() && !self.is_translating
    }

    /// テキスト抽出を開始
    ///
    /// 画像がなければエラーを設定して Err を返す（呼び出しは行わない）
    pub fn begin_extraction(&mut self) -> Result<ExtractionJob, String> {
        let Some(image) = self.image.clone() else {
            self.error = Some(MISSING_IMAGE_MESSAGE.to_string());
            return Err(MISSING_IMAGE_MESSAGE.to_string());
        };

        self.error = None;
        self.source_text.clear();
        self.translated_text.clear();
        self.is_extracting = true;
        self.extraction_seq += 1;
        tracing::debug!("extraction #{} started: {}", self.extraction_seq, image.file_name);

        Ok(ExtractionJob {
            seq: self.extraction_seq,
            image,
        })
    }

    /// テキスト抽出の結果を書き戻す
    ///
    /// 古いリクエストの結果なら何もせず false を返す
    pub fn complete_extraction(&mut self, seq: u64, result: Result<String, Error>) -> bool {
        if seq != self.extraction_seq {
            tracing::debug!("stale extraction #{} dropped (latest #{})", seq, self.extraction_seq);
            return false;
        }

        self.is_extracting = false;
        match result {
            Ok(text) => self.source_text = text,
            Err(e) => {
                tracing::warn!("テキスト抽出に失敗: {}", e);
                self.source_text.clear();
                self.translated_text.clear();
                self.error = Some(e.user_message(EXTRACTION_FAILED_MESSAGE));
            }
        }
        true
    }

    /// 翻訳を開始
    ///
    /// 原文が空なら翻訳結果は変更せずエラーを設定して Err を返す
    pub fn begin_translation<S: KeyValueStore>(
        &mut self,
        dictionary: &Dictionary<S>,
    ) -> Result<TranslationJob, String> {
        if self.source_text.trim().is_empty() {
            self.error = Some(EMPTY_SOURCE_MESSAGE.to_string());
            return Err(EMPTY_SOURCE_MESSAGE.to_string());
        }

        self.error = None;
        self.is_translating = true;
        self.translation_seq += 1;
        tracing::debug!(
            "translation #{} started with {} custom rule(s)",
            self.translation_seq,
            dictionary.len()
        );

        Ok(TranslationJob {
            seq: self.translation_seq,
            prompt: build_translation_prompt(&self.source_text, dictionary.entries()),
        })
    }

    /// 翻訳結果を書き戻す（加工しない）
    pub fn complete_translation(&mut self, seq: u64, result: Result<String, Error>) -> bool {
        if seq != self.translation_seq {
            tracing::debug!("stale translation #{} dropped (latest #{})", seq, self.translation_seq);
            return false;
        }

        self.is_translating = false;
        match result {
            Ok(text) => self.translated_text = text,
            Err(e) => {
                tracing::warn!("翻訳に失敗: {}", e);
                self.error = Some(e.user_message(TRANSLATION_FAILED_MESSAGE));
            }
        }
        true
    }

    /// 辞書追加フォームの入力を取り出す
    ///
    /// 両方が空でなければtrim済みの組を返して入力欄をクリアする
    pub fn take_dictionary_input(&mut self) -> Option<(String, String)> {
        let english = self.new_english.trim();
        let bisaya = self.new_bisaya.trim();
        if english.is_empty() || bisaya.is_empty() {
            return None;
        }
        let pair = (english.to_string(), bisaya.to_string());
        self.new_english.clear();
        self.new_bisaya.clear();
        Some(pair)
    }
}
