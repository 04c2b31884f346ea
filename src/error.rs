use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("APIキーが設定されていません。`bisaya config --set-api-key YOUR_KEY` で設定するか GEMINI_API_KEY を指定してください")]
    MissingApiKey,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("API呼び出しエラー: {0}")]
    ApiCall(String),

    /// 画像未選択・原文が空など、呼び出し前に止めたもの
    #[error("{0}")]
    Precondition(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("辞書に {0} 番のルールはありません")]
    InvalidIndex(usize),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(bisaya_common::Error),
}

impl From<bisaya_common::Error> for TranslatorError {
    fn from(err: bisaya_common::Error) -> Self {
        match err {
            bisaya_common::Error::Precondition(message) => TranslatorError::Precondition(message),
            bisaya_common::Error::Api(message) => TranslatorError::ApiCall(message),
            other => TranslatorError::Common(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
