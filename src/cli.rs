use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bisaya")]
#[command(about = "画像の英語テキストを抽出してビサヤ語に翻訳するツール", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像から英語テキストを抽出
    Extract {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// 英語テキストをビサヤ語に翻訳（カスタム辞書を適用）
    Translate {
        /// 翻訳するテキスト（省略時は --file または標準入力）
        text: Option<String>,

        /// テキストファイルから読み込む
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },

    /// 抽出から翻訳まで一括実行
    Run {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// カスタム翻訳辞書を管理
    Dict {
        #[command(subcommand)]
        action: DictAction,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 画像抽出に使うモデル
        #[arg(long)]
        set_vision_model: Option<String>,

        /// 翻訳に使うモデル
        #[arg(long)]
        set_text_model: Option<String>,

        /// 生成温度 (0.0〜2.0)
        #[arg(long, value_parser = parse_temperature)]
        set_temperature: Option<f32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 対話モード（画面と同じ操作をメニューで行う）
    Interactive {
        /// 最初に選択する画像
        image: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DictAction {
    /// 登録済みのルールを一覧表示
    List,

    /// ルールを追加
    Add {
        /// 英語
        english: String,
        /// ビサヤ語
        bisaya: String,
    },

    /// ルールを削除（一覧の番号、1始まり）
    Remove {
        index: usize,
    },
}

/// 生成温度の範囲チェック
fn parse_temperature(value: &str) -> Result<f32, String> {
    let temperature: f32 = value
        .parse()
        .map_err(|_| format!("数値を指定してください: {}", value))?;
    if (0.0..=2.0).contains(&temperature) {
        Ok(temperature)
    } else {
        Err(format!("0.0〜2.0 の範囲で指定してください: {}", value))
    }
}
