//! テキスト抽出・翻訳の実行
//!
//! begin → モデル呼び出し（1回のみ） → complete を順に実行する。
//! CLIとテストで使用。ブラウザは同じ遷移を spawn_local 内で個別に呼ぶ

use crate::dictionary::{Dictionary, KeyValueStore};
use crate::error::{Error, Result};
use crate::gemini::{GeminiConfig, GenerativeModel};
use crate::state::AppState;

/// 選択中の画像から英語テキストを抽出
///
/// 画像が未選択なら呼び出しは行わず、状態にメッセージを設定して
/// `Error::Precondition` を返す
pub async fn extract<M: GenerativeModel + ?Sized>(
    state: &mut AppState,
    config: &GeminiConfig,
    model: &M,
) -> Result<()> {
    let job = state.begin_extraction().map_err(Error::Precondition)?;
    let request = config.extraction_request(&job.image);
    let result = model.generate(&config.vision_model, &request).await;
    finish(result, |r| state.complete_extraction(job.seq, r))
}

/// 原文をビサヤ語に翻訳
pub async fn translate<S: KeyValueStore, M: GenerativeModel + ?Sized>(
    state: &mut AppState,
    dictionary: &Dictionary<S>,
    config: &GeminiConfig,
    model: &M,
) -> Result<()> {
    let job = state.begin_translation(dictionary).map_err(Error::Precondition)?;
    let request = config.translation_request(&job.prompt);
    let result = model.generate(&config.text_model, &request).await;
    finish(result, |r| state.complete_translation(job.seq, r))
}

// 状態へ書き戻し、呼び出し元には失敗を伝える
fn finish(result: Result<String>, complete: impl FnOnce(Result<String>) -> bool) -> Result<()> {
    match result {
        Ok(text) => {
            complete(Ok(text));
            Ok(())
        }
        Err(e) => {
            let message = e.to_string();
            complete(Err(e));
            Err(Error::Api(message))
        }
    }
}
