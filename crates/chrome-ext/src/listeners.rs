//! Event listener registration
//!
//! Closures are leaked with `forget`: listeners live as long as the page
//! or service worker.

use std::future::Future;

use serde::{Deserialize, Serialize};
use todo_sync::{Message, StorageChanges, TabId};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::bindings::{runtime_on_message_add_listener, storage_on_changed_add_listener};
use crate::storage::to_js;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SenderTab {
    #[serde(default)]
    pub id: Option<i32>,
}

/// Who sent a runtime message
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageSender {
    #[serde(default)]
    pub tab: Option<SenderTab>,
}

impl MessageSender {
    pub fn tab_id(&self) -> Option<TabId> {
        self.tab.as_ref().and_then(|tab| tab.id).map(TabId)
    }
}

/// Listen to `chrome.storage.onChanged`; the handler gets the area name
pub fn on_storage_changed<F>(mut handler: F)
where
    F: FnMut(&str, StorageChanges) + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue, String)>::new(move |changes: JsValue, area: String| {
        let json: serde_json::Value = match serde_wasm_bindgen::from_value(changes) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("[EXT] Unreadable storage change event: {}", e);
                return;
            }
        };
        handler(&area, StorageChanges::from_json_lossy(&json));
    });
    storage_on_changed_add_listener(&callback);
    callback.forget();
}

/// Decode a runtime message and its sender; `None` when the message is not ours
pub fn decode_runtime_message(raw: JsValue, sender: JsValue) -> Option<(Message, MessageSender)> {
    let message: Message = serde_wasm_bindgen::from_value(raw).ok()?;
    let sender: MessageSender = serde_wasm_bindgen::from_value(sender).unwrap_or_default();
    Some((message, sender))
}

/// Encode a reply for `sendResponse`; `undefined` if it cannot be encoded
pub fn encode_reply<R: Serialize>(reply: &R) -> JsValue {
    match to_js(reply) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("[EXT] Could not encode reply: {}", e);
            JsValue::UNDEFINED
        }
    }
}

/// Listen to `chrome.runtime.onMessage`.
///
/// Messages that are not ours are left for other listeners. The handler's
/// reply, if any, is sent back asynchronously.
pub fn on_message<F, Fut, R>(handler: F)
where
    F: Fn(Message, MessageSender) -> Fut + 'static,
    Fut: Future<Output = Option<R>> + 'static,
    R: Serialize + 'static,
{
    let callback = Closure::<dyn FnMut(JsValue, JsValue, js_sys::Function) -> JsValue>::new(
        move |raw: JsValue, sender: JsValue, send_response: js_sys::Function| {
            let Some((message, sender)) = decode_runtime_message(raw, sender) else {
                return JsValue::FALSE;
            };
            let reply = handler(message, sender);
            spawn_local(async move {
                let Some(reply) = reply.await else {
                    return;
                };
                let value = encode_reply(&reply);
                if value.is_undefined() {
                    return;
                }
                if let Err(e) = send_response.call1(&JsValue::NULL, &value) {
                    log::debug!("[EXT] Reply not delivered: {}", crate::js_error_text(&e));
                }
            });
            // Keep the channel open for the async reply
            JsValue::TRUE
        },
    );
    runtime_on_message_add_listener(&callback);
    callback.forget();
}
