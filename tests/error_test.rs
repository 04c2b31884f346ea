//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use bisaya_translator::error::TranslatorError;
use bisaya_translator::image_input::load_image;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない画像を読み込んだ場合
#[test]
fn test_load_nonexistent_image() {
    let err = load_image(Path::new("/nonexistent/path/12345.png")).unwrap_err();
    assert!(matches!(err, TranslatorError::FileNotFound(_)));
}

/// 画像でないファイルを読み込んだ場合
#[test]
fn test_load_text_file_as_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, TranslatorError::ImageLoad(_)));
}

/// TranslatorErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TranslatorError::Config("テスト設定エラー".to_string()),
        TranslatorError::FileNotFound("test.jpg".to_string()),
        TranslatorError::ImageLoad("broken".to_string()),
        TranslatorError::ApiCall("API呼び出し失敗".to_string()),
        TranslatorError::Precondition("Please upload an image first.".to_string()),
        TranslatorError::Prompt("interrupted".to_string()),
        TranslatorError::InvalidIndex(3),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = format!("{}", TranslatorError::MissingApiKey);
    assert!(display.contains("APIキー"));
    assert!(display.contains("bisaya config"));
    assert!(display.contains("GEMINI_API_KEY"));
}

/// 前提条件エラーはメッセージをそのまま表示
#[test]
fn test_precondition_error_is_verbatim() {
    let common_err = bisaya_common::Error::Precondition("Please upload an image first.".to_string());
    let err: TranslatorError = common_err.into();

    assert!(matches!(err, TranslatorError::Precondition(_)));
    assert_eq!(err.to_string(), "Please upload an image first.");
}

/// API失敗はApiCallに変換
#[test]
fn test_api_error_conversion() {
    let err: TranslatorError = bisaya_common::Error::Api("API error 429".to_string()).into();
    assert!(matches!(err, TranslatorError::ApiCall(_)));
    assert!(err.to_string().contains("API error 429"));
}

/// その他の共通エラーは透過的に表示
#[test]
fn test_common_error_transparent() {
    let err: TranslatorError = bisaya_common::Error::Storage("quota".to_string()).into();
    assert!(matches!(err, TranslatorError::Common(_)));
    assert_eq!(err.to_string(), "Storage error: quota");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: TranslatorError = io_err.into();

    assert!(matches!(err, TranslatorError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: TranslatorError = json_err.into();
    assert!(matches!(err, TranslatorError::JsonParse(_)));
}
