//! `chrome.storage.local` as a [`StateStore`]

use async_trait::async_trait;
use serde::Serialize;
use todo_sync::{StateStore, StoredState, SyncError, SyncResult, STATE_KEYS};

use crate::bindings::{storage_local_get, storage_local_set};
use crate::js_error_text;

/// Plain JS objects instead of `Map`s, so storage sees ordinary objects
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<wasm_bindgen::JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeStorage;

#[async_trait(?Send)]
impl StateStore for ChromeStorage {
    async fn load(&self) -> SyncResult<StoredState> {
        let keys = to_js(&STATE_KEYS).map_err(|e| SyncError::Decode(e.to_string()))?;
        let raw = storage_local_get(keys)
            .await
            .map_err(|e| SyncError::Storage(js_error_text(&e)))?;
        let json: serde_json::Value =
            serde_wasm_bindgen::from_value(raw).map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(StoredState::from_json_lossy(&json))
    }

    async fn save(&self, update: StoredState) -> SyncResult<()> {
        let items = to_js(&update).map_err(|e| SyncError::Decode(e.to_string()))?;
        storage_local_set(items)
            .await
            .map_err(|e| SyncError::Storage(js_error_text(&e)))?;
        Ok(())
    }
}
