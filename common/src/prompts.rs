//! プロンプト生成モジュール
//!
//! CLIとWeb(WASM)で共有されるプロンプト:
//! - EXTRACTION_PROMPT: 画像からの英語テキスト抽出用の固定指示
//! - build_translation_prompt: ビサヤ語翻訳用プロンプト

use crate::types::CustomTranslation;

/// 画像テキスト抽出用の固定指示
pub const EXTRACTION_PROMPT: &str = "Extract all the English words and sentences visible in this image. \
Return only the extracted text, preserving line breaks, without any explanation or commentary.";

/// 翻訳プロンプト生成
///
/// ルールがある場合は各ルールを `'<english>' must be translated as '<bisaya>'`
/// としてカンマ区切りで埋め込み、厳守の指示を続ける。
/// 原文は末尾にダブルクォートで囲んでそのまま埋め込む。
///
/// # Arguments
/// * `source_text` - 翻訳する英語テキスト
/// * `rules` - ユーザー定義の翻訳ルール
///
/// # Examples
/// ```
/// use bisaya_common::{build_translation_prompt, CustomTranslation};
///
/// let rules = vec![CustomTranslation::new("church", "iglesya").unwrap()];
/// let prompt = build_translation_prompt("I went to church.", &rules);
/// assert!(prompt.contains("'church' must be translated as 'iglesya'"));
/// assert!(prompt.ends_with("\"I went to church.\""));
/// ```
pub fn build_translation_prompt(source_text: &str, rules: &[CustomTranslation]) -> String {
    if rules.is_empty() {
        return format!("Translate the following English text to Bisaya: \"{source_text}\"");
    }

    let clauses = rules
        .iter()
        .map(|rule| {
            format!(
                "'{}' must be translated as '{}'",
                rule.english.trim(),
                rule.bisaya.trim()
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Translate the following English text to Bisaya. \
Use these custom translations: {clauses}. \
Follow these custom translations strictly and do not deviate from them. \
Text to translate: \"{source_text}\""
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(english: &str, bisaya: &str) -> CustomTranslation {
        CustomTranslation {
            english: english.to_string(),
            bisaya: bisaya.to_string(),
        }
    }

    #[test]
    fn test_plain_prompt_without_rules() {
        let prompt = build_translation_prompt("Good morning", &[]);
        assert_eq!(prompt, "Translate the following English text to Bisaya: \"Good morning\"");
        assert!(!prompt.contains("must be translated as"));
    }

    #[test]
    fn test_prompt_with_single_rule() {
        let prompt = build_translation_prompt("I went to church.", &[rule("church", "iglesya")]);
        assert!(prompt.contains("'church' must be translated as 'iglesya'"));
        assert!(prompt.contains("Follow these custom translations strictly"));
        assert!(prompt.ends_with("\"I went to church.\""));
    }

    #[test]
    fn test_prompt_has_one_clause_per_rule() {
        let rules = vec![
            rule("church", "iglesya"),
            rule("house", "balay"),
            rule("church", "simbahan"),
        ];
        let prompt = build_translation_prompt("The house near the church", &rules);

        assert_eq!(prompt.matches("must be translated as").count(), 3);
        assert!(prompt.contains(
            "'church' must be translated as 'iglesya', 'house' must be translated as 'balay', 'church' must be translated as 'simbahan'"
        ));
    }

    #[test]
    fn test_prompt_quotes_trimmed_rule_values() {
        let prompt = build_translation_prompt("water", &[rule("  water ", " tubig  ")]);
        assert!(prompt.contains("'water' must be translated as 'tubig'"));
    }

    #[test]
    fn test_source_text_is_embedded_literally() {
        let source = "Line one\n  \"quoted\" line two ";
        let prompt = build_translation_prompt(source, &[rule("one", "usa")]);
        assert!(prompt.ends_with(&format!("\"{source}\"")));
    }

    #[test]
    fn test_extraction_prompt_asks_for_english_text() {
        assert!(EXTRACTION_PROMPT.starts_with("Extract all the English words"));
    }
}
