//! `chrome.tabs` as a [`TabMessenger`]

use async_trait::async_trait;
use serde::Deserialize;
use todo_sync::{Message, SyncError, SyncResult, TabId, TabMessenger};

use crate::bindings::{tabs_query, tabs_send_message};
use crate::js_error_text;
use crate::storage::to_js;

#[derive(Deserialize)]
struct TabInfo {
    #[serde(default)]
    id: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabMessenger for ChromeTabs {
    async fn query_tabs(&self) -> SyncResult<Vec<TabId>> {
        let query = js_sys::Object::new();
        let raw = tabs_query(query.into())
            .await
            .map_err(|e| SyncError::Messaging(js_error_text(&e)))?;
        let tabs: Vec<TabInfo> =
            serde_wasm_bindgen::from_value(raw).map_err(|e| SyncError::Decode(e.to_string()))?;
        Ok(tabs.into_iter().filter_map(|tab| tab.id).map(TabId).collect())
    }

    async fn send(&self, tab: TabId, message: &Message) -> SyncResult<()> {
        let js_message = to_js(message).map_err(|e| SyncError::Decode(e.to_string()))?;
        tabs_send_message(tab.0, js_message)
            .await
            .map_err(|e| SyncError::Messaging(js_error_text(&e)))?;
        Ok(())
    }
}
