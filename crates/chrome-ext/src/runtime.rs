//! `chrome.runtime.sendMessage` as the tab side of the relay

use async_trait::async_trait;
use todo_sync::{Message, RelayClient, SyncAck, SyncError, SyncResult, Todo};

use crate::bindings::runtime_send_message;
use crate::js_error_text;
use crate::storage::to_js;

#[derive(Debug, Clone, Copy, Default)]
pub struct ChromeRuntime;

impl ChromeRuntime {
    pub async fn send(&self, message: &Message) -> SyncResult<Option<SyncAck>> {
        let js_message = to_js(message).map_err(|e| SyncError::Decode(e.to_string()))?;
        let reply = runtime_send_message(js_message)
            .await
            .map_err(|e| SyncError::Messaging(js_error_text(&e)))?;
        if reply.is_undefined() || reply.is_null() {
            return Ok(None);
        }
        serde_wasm_bindgen::from_value(reply)
            .map(Some)
            .map_err(|e| SyncError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl RelayClient for ChromeRuntime {
    async fn update_todos(&self, todos: &[Todo]) -> SyncResult<()> {
        let message = Message::UpdateTodos { todos: todos.to_vec() };
        match self.send(&message).await? {
            Some(SyncAck { success: false }) => Err(SyncError::Storage("relay could not persist todos".to_string())),
            _ => Ok(()),
        }
    }
}
