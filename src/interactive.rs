//! 対話モード
//!
//! ブラウザ画面と同じ状態遷移（AppState）をメニュー操作で駆動する。
//! 操作のたびに画面全体を表示し直す

use bisaya_common::{AppState, Dictionary, GeminiConfig, GenerativeModel, KeyValueStore};
use dialoguer::{Confirm, Input, Select};
use std::path::{Path, PathBuf};

use crate::error::{Result, TranslatorError};
use crate::image_input::load_image;
use crate::progress::with_spinner;

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    SelectImage,
    ClearImage,
    Extract,
    EditSource,
    Translate,
    AddRule,
    RemoveRule,
    Quit,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::SelectImage => "画像を選択",
            MenuItem::ClearImage => "画像の選択を解除",
            MenuItem::Extract => "テキストを抽出",
            MenuItem::EditSource => "原文を編集",
            MenuItem::Translate => "ビサヤ語に翻訳",
            MenuItem::AddRule => "カスタム翻訳を追加",
            MenuItem::RemoveRule => "カスタム翻訳を削除",
            MenuItem::Quit => "終了",
        }
    }
}

/// 現在の状態で選択できるメニュー
///
/// 抽出・翻訳はボタンの無効化と同じ条件で隠す
pub fn menu_items<S: KeyValueStore>(state: &AppState, dictionary: &Dictionary<S>) -> Vec<MenuItem> {
    let mut items = vec![MenuItem::SelectImage];
    if state.image.is_some() {
        items.push(MenuItem::ClearImage);
    }
    if state.can_extract() {
        items.push(MenuItem::Extract);
    }
    items.push(MenuItem::EditSource);
    if state.can_translate() {
        items.push(MenuItem::Translate);
    }
    items.push(MenuItem::AddRule);
    if !dictionary.is_empty() {
        items.push(MenuItem::RemoveRule);
    }
    items.push(MenuItem::Quit);
    items
}

/// 画面表示用テキスト
pub fn render<S: KeyValueStore>(state: &AppState, dictionary: &Dictionary<S>) -> String {
    let mut lines = Vec::new();

    if let Some(error) = &state.error {
        lines.push(format!("⚠ {}", error));
        lines.push(String::new());
    }

    let image = state
        .image
        .as_ref()
        .map(|i| format!("{} ({})", i.preview_url, i.mime_type))
        .unwrap_or_else(|| "(未選択)".to_string());
    lines.push(format!("画像: {}", image));

    lines.push("原文 (English):".to_string());
    lines.push(indent_or_placeholder(&state.source_text));
    lines.push("翻訳 (Bisaya):".to_string());
    lines.push(indent_or_placeholder(&state.translated_text));

    lines.push(format!("カスタム翻訳 ({}件):", dictionary.len()));
    for (i, rule) in dictionary.entries().iter().enumerate() {
        lines.push(format!("  {}. {} → {}", i + 1, rule.english, rule.bisaya));
    }

    lines.join("\n")
}

fn indent_or_placeholder(text: &str) -> String {
    if text.is_empty() {
        return "  -".to_string();
    }
    text.lines().map(|l| format!("  {}", l)).collect::<Vec<_>>().join("\n")
}

pub struct Session<S, M> {
    pub state: AppState,
    pub dictionary: Dictionary<S>,
    config: GeminiConfig,
    model: M,
}

impl<S: KeyValueStore, M: GenerativeModel> Session<S, M> {
    pub fn new(dictionary: Dictionary<S>, config: GeminiConfig, model: M) -> Self {
        Self {
            state: AppState::new(),
            dictionary,
            config,
            model,
        }
    }

    /// 画像ファイルを選択
    ///
    /// 読み込めない場合はエラーバナーに表示して状態は変えない
    pub fn select_image(&mut self, path: &Path) {
        match load_image(path) {
            Ok(image) => {
                self.state.select_image(image);
            }
            Err(e) => self.state.error = Some(e.to_string()),
        }
    }

    /// 画像の選択を解除（テキストもクリアされる）
    pub fn clear_image(&mut self) {
        if let Some(path) = self.state.clear_image() {
            tracing::debug!("image cleared: {}", path);
        }
    }

    pub async fn extract(&mut self) {
        let result = with_spinner(
            "テキスト抽出中...",
            bisaya_common::extract(&mut self.state, &self.config, &self.model),
        )
        .await;
        // 失敗内容は state.error に入っている
        if let Err(e) = result {
            tracing::debug!("extract failed: {}", e);
        }
    }

    pub async fn translate(&mut self) {
        let result = with_spinner(
            "翻訳中...",
            bisaya_common::translate(&mut self.state, &self.dictionary, &self.config, &self.model),
        )
        .await;
        if let Err(e) = result {
            tracing::debug!("translate failed: {}", e);
        }
    }

    /// 入力バッファからルールを追加
    pub fn add_rule(&mut self, english: &str, bisaya: &str) -> bool {
        self.state.set_new_english(english);
        self.state.set_new_bisaya(bisaya);
        match self.state.take_dictionary_input() {
            Some((english, bisaya)) => self.dictionary.add(&english, &bisaya),
            None => false,
        }
    }

    /// メニューループ
    pub async fn run(&mut self, initial_image: Option<PathBuf>) -> Result<()> {
        if let Some(path) = initial_image {
            self.select_image(&path);
        }

        loop {
            println!("\n{}\n", render(&self.state, &self.dictionary));

            let items = menu_items(&self.state, &self.dictionary);
            let labels: Vec<&str> = items.iter().map(|i| i.label()).collect();
            let selected = Select::new()
                .with_prompt("操作を選択")
                .items(&labels)
                .default(0)
                .interact()
                .map_err(prompt_error)?;

            match items[selected] {
                MenuItem::SelectImage => {
                    let path: String = Input::new()
                        .with_prompt("画像ファイルのパス")
                        .interact_text()
                        .map_err(prompt_error)?;
                    self.select_image(Path::new(path.trim()));
                }
                MenuItem::ClearImage => self.clear_image(),
                MenuItem::Extract => self.extract().await,
                MenuItem::EditSource => {
                    let text: String = Input::new()
                        .with_prompt("原文")
                        .with_initial_text(self.state.source_text.clone())
                        .allow_empty(true)
                        .interact_text()
                        .map_err(prompt_error)?;
                    self.state.set_source_text(text);
                }
                MenuItem::Translate => self.translate().await,
                MenuItem::AddRule => {
                    let english: String = Input::new()
                        .with_prompt("English")
                        .allow_empty(true)
                        .interact_text()
                        .map_err(prompt_error)?;
                    let bisaya: String = Input::new()
                        .with_prompt("Bisaya")
                        .allow_empty(true)
                        .interact_text()
                        .map_err(prompt_error)?;
                    self.add_rule(&english, &bisaya);
                }
                MenuItem::RemoveRule => {
                    let labels: Vec<String> = self
                        .dictionary
                        .entries()
                        .iter()
                        .map(|r| format!("{} → {}", r.english, r.bisaya))
                        .collect();
                    let index = Select::new()
                        .with_prompt("削除するルール")
                        .items(&labels)
                        .interact()
                        .map_err(prompt_error)?;
                    self.dictionary.remove(index);
                }
                MenuItem::Quit => {
                    let quit = Confirm::new()
                        .with_prompt("終了しますか？")
                        .default(true)
                        .interact()
                        .map_err(prompt_error)?;
                    if quit {
                        return Ok(());
                    }
                }
            }
        }
    }
}

fn prompt_error(e: dialoguer::Error) -> TranslatorError {
    TranslatorError::Prompt(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bisaya_common::{GeminiRequest, MemoryStore, SelectedImage};

    struct EchoModel;

    #[async_trait(?Send)]
    impl GenerativeModel for EchoModel {
        async fn generate(&self, model: &str, _request: &GeminiRequest) -> bisaya_common::Result<String> {
            Ok(format!("reply from {}", model))
        }
    }

    fn session() -> Session<MemoryStore, EchoModel> {
        Session::new(
            Dictionary::load(MemoryStore::new()),
            GeminiConfig::new("key"),
            EchoModel,
        )
    }

    #[test]
    fn test_menu_hides_disabled_actions() {
        let session = session();
        let items = menu_items(&session.state, &session.dictionary);
        assert!(!items.contains(&MenuItem::Extract));
        assert!(!items.contains(&MenuItem::Translate));
        assert!(!items.contains(&MenuItem::RemoveRule));
        assert!(!items.contains(&MenuItem::ClearImage));
        assert_eq!(items.last(), Some(&MenuItem::Quit));
    }

    #[test]
    fn test_menu_shows_enabled_actions() {
        let mut session = session();
        session.state.select_image(SelectedImage::from_bytes(
            "a.png",
            "image/png",
            b"x",
            "a.png".to_string(),
        ));
        session.state.set_source_text("Hello");
        session.add_rule("church", "iglesya");

        let items = menu_items(&session.state, &session.dictionary);
        assert!(items.contains(&MenuItem::Extract));
        assert!(items.contains(&MenuItem::Translate));
        assert!(items.contains(&MenuItem::RemoveRule));
        assert!(items.contains(&MenuItem::ClearImage));
    }

    #[test]
    fn test_clear_image_resets_screen() {
        let mut session = session();
        session.state.select_image(SelectedImage::from_bytes(
            "a.png",
            "image/png",
            b"x",
            "a.png".to_string(),
        ));
        session.state.set_source_text("EXIT");
        session.state.translated_text = "GAWAS".to_string();

        session.clear_image();

        assert!(session.state.image.is_none());
        assert!(session.state.source_text.is_empty());
        assert!(session.state.translated_text.is_empty());
        let items = menu_items(&session.state, &session.dictionary);
        assert!(!items.contains(&MenuItem::ClearImage));
        assert!(!items.contains(&MenuItem::Extract));
        assert!(render(&session.state, &session.dictionary).contains("画像: (未選択)"));
    }

    #[test]
    fn test_add_rule_ignores_blank_input() {
        let mut session = session();
        assert!(!session.add_rule("  ", "iglesya"));
        assert!(session.add_rule(" church ", "iglesya "));
        assert_eq!(session.dictionary.entries()[0].english, "church");
        assert!(session.state.new_english.is_empty());
    }

    #[test]
    fn test_select_missing_image_shows_error() {
        let mut session = session();
        session.select_image(Path::new("/nonexistent/a.png"));
        assert!(session.state.image.is_none());
        assert!(session.state.error.as_deref().unwrap().contains("/nonexistent/a.png"));
    }

    #[test]
    fn test_render_lists_state() {
        let mut session = session();
        session.add_rule("church", "iglesya");
        session.state.set_source_text("I went to church.");
        session.state.error = Some("Please upload an image first.".to_string());

        let screen = render(&session.state, &session.dictionary);
        assert!(screen.starts_with("⚠ Please upload an image first."));
        assert!(screen.contains("画像: (未選択)"));
        assert!(screen.contains("  I went to church."));
        assert!(screen.contains("  1. church → iglesya"));
    }

    #[tokio::test]
    async fn test_translate_updates_state() {
        let mut session = session();
        session.state.set_source_text("Hello");
        session.translate().await;
        assert_eq!(session.state.translated_text, "reply from gemini-2.0-flash");
        assert!(session.state.error.is_none());
    }
}
