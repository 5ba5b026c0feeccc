//! Chrome Extension Bindings
//!
//! Thin `wasm-bindgen` wrappers over `chrome.storage`, `chrome.runtime` and
//! `chrome.tabs`, and implementations of the core sync traits on top of them.

mod bindings;
mod listeners;
mod runtime;
mod storage;
mod tabs;

pub use listeners::{
    decode_runtime_message, encode_reply, on_message, on_storage_changed, MessageSender, SenderTab,
};
pub use runtime::ChromeRuntime;
pub use storage::ChromeStorage;
pub use tabs::ChromeTabs;

use wasm_bindgen::JsValue;

/// Readable text for a rejected promise or thrown value
pub(crate) fn js_error_text(err: &JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
