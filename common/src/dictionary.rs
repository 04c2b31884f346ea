//! カスタム翻訳辞書の永続化
//!
//! キー `customTranslations` にJSON配列として保存する。
//! 一覧を変更するたびに全件を書き込む（ライトスルー）。

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::CustomTranslation;

/// 保存キー
pub const STORAGE_KEY: &str = "customTranslations";

/// 文字列のキー・バリューストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// メモリ上のストア（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値を持つストア
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// カスタム翻訳辞書
#[derive(Debug, Clone)]
pub struct Dictionary<S> {
    store: S,
    entries: Vec<CustomTranslation>,
}

impl<S: KeyValueStore> Dictionary<S> {
    /// ストアから読み込む
    ///
    /// キーがなければ空。JSONが不正なら警告ログを出して空のまま続行する
    pub fn load(store: S) -> Self {
        Self::load_with(store, |e| {
            tracing::warn!("カスタム翻訳の読み込みに失敗しました: {}", e);
        })
    }

    /// 読み込み失敗時の通知先を指定して読み込む
    pub fn load_with(store: S, on_error: impl FnOnce(&Error)) -> Self {
        let entries = match read_entries(&store) {
            Ok(entries) => entries,
            Err(e) => {
                on_error(&e);
                Vec::new()
            }
        };
        Self { store, entries }
    }

    pub fn entries(&self) -> &[CustomTranslation] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// ルールを追加
    ///
    /// 両フィールドをtrimし、どちらかが空なら何もせず false を返す
    pub fn add(&mut self, english: &str, bisaya: &str) -> bool {
        let Some(rule) = CustomTranslation::new(english, bisaya) else {
            return false;
        };
        tracing::debug!("add custom translation: {} -> {}", rule.english, rule.bisaya);
        self.entries.push(rule);
        self.write_through();
        true
    }

    /// 指定位置のルールを削除
    pub fn remove(&mut self, index: usize) -> Option<CustomTranslation> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        tracing::debug!("remove custom translation #{}: {}", index, removed.english);
        self.write_through();
        Some(removed)
    }

    /// 全件をJSON配列としてストアへ書き込む
    pub fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(STORAGE_KEY, &json)
    }

    // 書き込み失敗でもメモリ上の変更は維持する
    fn write_through(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!("カスタム翻訳の保存に失敗しました: {}", e);
        }
    }
}

/// ストアからルール一覧を読み込む
pub fn read_entries<S: KeyValueStore>(store: &S) -> Result<Vec<CustomTranslation>> {
    match store.get(STORAGE_KEY)? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}
