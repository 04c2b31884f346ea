//! ファイルベースのキー・バリューストア
//!
//! ブラウザの localStorage と同じく文字列キー → 文字列値を保持し、
//! 1つのJSONオブジェクトとして保存する

use bisaya_common::{Error, KeyValueStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 設定ディレクトリ内の storage.json
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> bisaya_common::Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> bisaya_common::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> bisaya_common::Result<()> {
        // 壊れたファイルは上書きして作り直す。読めないファイルはエラー
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(Error::Storage(e)) => {
                tracing::warn!("壊れたストレージを作り直します: {}", e);
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
