//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Gemini API呼び出しの失敗（ネットワーク・ステータス・空レスポンス）
    #[error("{0}")]
    Api(String),

    /// 入力不足で呼び出しを行わなかった
    #[error("{0}")]
    Precondition(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// UIに表示するメッセージ
    ///
    /// 元のエラーメッセージが空ならフォールバック文言を返す
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
