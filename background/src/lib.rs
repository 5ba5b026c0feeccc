//! Floating Todo Background
//!
//! Service-worker entry point. The loader script registers the runtime
//! message listener synchronously, waits for this module to initialize, and
//! hands each message to [`handle_runtime_message`]. The relay keeps no state
//! between messages, so a worker woken by a message serves it on first use.

use chrome_ext::{decode_runtime_message, encode_reply, ChromeStorage, ChromeTabs};
use log::LevelFilter;
use todo_sync::Relay;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = rolling_logger::init("background", LevelFilter::Info);
    log::info!("[BACKGROUND] Relay ready");
}

/// Persist a tab's update and rebroadcast it.
///
/// Resolves to the `{success}` reply, or `undefined` for messages the relay
/// does not handle.
#[wasm_bindgen(js_name = handleRuntimeMessage)]
pub async fn handle_runtime_message(message: JsValue, sender: JsValue) -> JsValue {
    let Some((message, sender)) = decode_runtime_message(message, sender) else {
        return JsValue::UNDEFINED;
    };
    let relay = Relay::new(ChromeStorage, ChromeTabs);
    match relay.handle_message(sender.tab_id(), message).await {
        Some(ack) => encode_reply(&ack),
        None => JsValue::UNDEFINED,
    }
}

/// Recent log lines of this worker, oldest first
#[wasm_bindgen(js_name = recentLogs)]
pub fn recent_logs() -> Vec<String> {
    rolling_logger::recent_lines()
}
