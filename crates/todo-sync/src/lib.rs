//! Floating Todo Core
//!
//! Platform-independent layers of the extension:
//! - todo / state: entities and their persisted form
//! - storage / relay: shared-store and cross-tab messaging seams, plus the
//!   background fan-out relay
//! - controller: the per-tab widget controller
//! - render / drag: text pipeline and drag geometry used by the view

mod config;
mod controller;
mod drag;
mod error;
mod message;
mod relay;
mod state;
mod storage;
mod todo;

pub mod render;

#[cfg(test)]
mod tests;

pub use config::WidgetConfig;
pub use controller::{Clock, RelayClient, SystemClock, WidgetController, WidgetView};
pub use drag::{clamp_to_viewport, DragSession, Point, Size};
pub use error::{SyncError, SyncResult};
pub use message::{Message, SyncAck, TabId};
pub use relay::{Relay, TabMessenger};
pub use state::{
    Position, StorageChange, StorageChanges, StoredState, WidgetState, KEY_IS_MINIMIZED, KEY_POSITION,
    KEY_TODOS, STATE_KEYS,
};
pub use storage::{MemoryStore, StateStore};
pub use todo::{Todo, TodoId, TodoList};
