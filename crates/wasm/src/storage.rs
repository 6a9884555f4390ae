//! [`KeyValueStore`] over `window.localStorage`.

use villani_page::{KeyValueStore, PageError};
use web_sys::Storage;

use crate::dom;

/// Local storage, or nothing when the browser denies access (private mode,
/// sandboxed frames). Reads then return `None` and writes fail.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Self {
        Self {
            storage: dom::window().and_then(|w| w.local_storage().ok().flatten()),
        }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PageError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| PageError::Storage("local storage unavailable".into()))?;
        storage
            .set_item(key, value)
            .map_err(|e| PageError::Storage(format!("{e:?}")))
    }
}
