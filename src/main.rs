use bisaya_common::{AppState, Dictionary};
use bisaya_translator::{cli, config, error, gemini, image_input, interactive, progress, storage};
use clap::Parser;
use cli::{Cli, Commands, DictAction};
use config::Config;
use error::{Result, TranslatorError};
use gemini::GeminiClient;
use std::io::Read;
use storage::FileStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;

    match cli.command {
        Commands::Extract { image } => {
            let client = build_client(&config)?;
            let mut state = AppState::new();
            state.select_image(image_input::load_image(&image)?);

            progress::with_spinner(
                "テキスト抽出中...",
                bisaya_common::extract(&mut state, client.config(), &client),
            )
            .await?;
            println!("{}", state.source_text);
        }

        Commands::Translate { text, file } => {
            let source = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    if !path.exists() {
                        return Err(TranslatorError::FileNotFound(path.display().to_string()));
                    }
                    std::fs::read_to_string(&path)?
                }
                (None, None) => {
                    let mut buffer = String::new();
                    std::io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };

            let client = build_client(&config)?;
            let dictionary = open_dictionary()?;
            let mut state = AppState::new();
            state.set_source_text(source);

            progress::with_spinner(
                "翻訳中...",
                bisaya_common::translate(&mut state, &dictionary, client.config(), &client),
            )
            .await?;
            println!("{}", state.translated_text);
        }

        Commands::Run { image } => {
            let client = build_client(&config)?;
            let dictionary = open_dictionary()?;
            let mut state = AppState::new();
            state.select_image(image_input::load_image(&image)?);

            println!("[1/2] テキスト抽出中...");
            progress::with_spinner(
                "Gemini に問い合わせ中...",
                bisaya_common::extract(&mut state, client.config(), &client),
            )
            .await?;
            println!("✔ 抽出完了\n");
            println!("{}\n", state.source_text);

            let rules = if dictionary.is_empty() {
                String::new()
            } else {
                format!(" (カスタム翻訳 {}件)", dictionary.len())
            };
            println!("[2/2] 翻訳中...{}", rules);
            progress::with_spinner(
                "Gemini に問い合わせ中...",
                bisaya_common::translate(&mut state, &dictionary, client.config(), &client),
            )
            .await?;
            println!("✔ 翻訳完了\n");
            println!("{}", state.translated_text);
        }

        Commands::Dict { action } => {
            let mut dictionary = open_dictionary()?;
            match action {
                DictAction::List => {
                    if dictionary.is_empty() {
                        println!("カスタム翻訳は登録されていません");
                    }
                    for (i, rule) in dictionary.entries().iter().enumerate() {
                        println!("{:>3}. {} → {}", i + 1, rule.english, rule.bisaya);
                    }
                }
                DictAction::Add { english, bisaya } => {
                    if dictionary.add(&english, &bisaya) {
                        println!("✔ 追加しました ({}件)", dictionary.len());
                    } else {
                        println!("英語とビサヤ語の両方を入力してください");
                    }
                }
                DictAction::Remove { index } => {
                    let removed = index
                        .checked_sub(1)
                        .and_then(|i| dictionary.remove(i))
                        .ok_or(TranslatorError::InvalidIndex(index))?;
                    println!("✔ 削除しました: {} → {}", removed.english, removed.bisaya);
                }
            }
        }

        Commands::Config {
            set_api_key,
            set_vision_model,
            set_text_model,
            set_temperature,
            show,
        } => {
            let mut config = config;
            let changed = set_api_key.is_some()
                || set_vision_model.is_some()
                || set_text_model.is_some()
                || set_temperature.is_some();

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
            }
            if let Some(model) = set_vision_model {
                config.vision_model = model;
            }
            if let Some(model) = set_text_model {
                config.text_model = model;
            }
            if let Some(temperature) = set_temperature {
                config.temperature = Some(temperature);
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  抽出モデル: {}", config.vision_model);
                println!("  翻訳モデル: {}", config.text_model);
                println!("  APIエンドポイント: {}", config.base_url);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                let temperature = config
                    .temperature
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "モデル既定値".to_string());
                println!("  生成温度: {}", temperature);
                println!("  APIキー: {}", if config.api_key.is_some() { "設定済み" } else { "未設定" });
            }
        }

        Commands::Interactive { image } => {
            let client = build_client(&config)?;
            let gemini_config = client.config().clone();
            let mut session = interactive::Session::new(open_dictionary()?, gemini_config, client);
            session.run(image).await?;
        }
    }

    Ok(())
}

fn build_client(config: &Config) -> Result<GeminiClient> {
    GeminiClient::new(config.gemini_config()?, config.timeout_seconds)
}

fn open_dictionary() -> Result<Dictionary<FileStore>> {
    let store = FileStore::in_dir(&Config::config_dir()?);
    tracing::debug!("custom translations: {}", store.path().display());
    Ok(Dictionary::load(store))
}
