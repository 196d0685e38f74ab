//! `localStorage` snapshot store

use hospitality_form_core::{FormError, SnapshotStore};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Snapshot store over `window.localStorage`
///
/// Sandboxed iframes and disabled cookies make `localStorage` throw on
/// access. The store then holds nothing: loads find no snapshot and writes
/// fail with `FormError::Storage`, which the controller logs.
pub struct LocalStorageStore {
    storage: Option<Storage>,
}

impl LocalStorageStore {
    pub fn new(window: &web_sys::Window) -> Self {
        let storage = match window.local_storage() {
            Ok(Some(storage)) => Some(storage),
            Ok(None) => {
                tracing::warn!("localStorage unavailable, autosave disabled");
                None
            }
            Err(e) => {
                tracing::warn!(error = ?e, "localStorage blocked, autosave disabled");
                None
            }
        };
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    fn storage(&self) -> Result<&Storage, FormError> {
        self.storage
            .as_ref()
            .ok_or_else(|| FormError::Storage("localStorage unavailable".into()))
    }
}

fn storage_err(e: JsValue) -> FormError {
    FormError::Storage(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl SnapshotStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>, FormError> {
        match &self.storage {
            Some(storage) => storage.get_item(key).map_err(storage_err),
            None => Ok(None),
        }
    }

    /// Quota and private-mode failures surface as `FormError::Storage`
    fn save(&mut self, key: &str, json: &str) -> Result<(), FormError> {
        self.storage()?.set_item(key, json).map_err(storage_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), FormError> {
        self.storage()?.remove_item(key).map_err(storage_err)
    }
}
