//! localStorage によるキー・バリューストア

use bisaya_common::{Error, KeyValueStore, Result};
use gloo::storage::{LocalStorage, Storage};

use crate::api::js_error_message;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| Error::Storage(js_error_message(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| Error::Storage(js_error_message(&e)))
    }
}
