//! Background Relay
//!
//! Persists todo updates coming from one tab and fans them out to every
//! other open tab. No ordering, dedup or retry: last write wins.

use async_trait::async_trait;
use futures_util::future::join_all;

use crate::error::SyncResult;
use crate::message::{Message, SyncAck, TabId};
use crate::state::StoredState;
use crate::storage::StateStore;
use crate::todo::Todo;

/// Access to the browser's open tabs
#[async_trait(?Send)]
pub trait TabMessenger {
    /// Ids of every open tab
    async fn query_tabs(&self) -> SyncResult<Vec<TabId>>;

    /// Deliver one message to one tab
    async fn send(&self, tab: TabId, message: &Message) -> SyncResult<()>;
}

/// Fan-out relay
pub struct Relay<S, T> {
    store: S,
    tabs: T,
}

impl<S: StateStore, T: TabMessenger> Relay<S, T> {
    pub fn new(store: S, tabs: T) -> Self {
        Self { store, tabs }
    }

    pub fn tabs(&self) -> &T {
        &self.tabs
    }

    /// Persist `todos`, then forward them to every tab but `origin`.
    ///
    /// Succeeds once persistence completes. Delivery failures are logged per
    /// tab and never reach the caller. With no origin tab (e.g. a popup
    /// sender) every tab receives the update.
    pub async fn notify(&self, origin: Option<TabId>, todos: Vec<Todo>) -> SyncResult<SyncAck> {
        self.store.save(StoredState::with_todos(todos.clone())).await?;

        let tabs = match self.tabs.query_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                log::warn!("[RELAY] Could not list tabs, update not forwarded: {}", e);
                return Ok(SyncAck::ok());
            }
        };

        let message = Message::SyncTodos { todos };
        let targets: Vec<TabId> = tabs.into_iter().filter(|tab| Some(*tab) != origin).collect();
        let results = join_all(targets.iter().map(|tab| self.tabs.send(*tab, &message))).await;

        for (tab, result) in targets.iter().zip(results) {
            if let Err(e) = result {
                log::debug!("[RELAY] Tab {} did not take SYNC_TODOS: {}", tab.0, e);
            }
        }
        log::debug!("[RELAY] Forwarded update from {:?} to {} tab(s)", origin, targets.len());
        Ok(SyncAck::ok())
    }

    /// Dispatch an incoming message; `None` means "not for the relay"
    pub async fn handle_message(&self, sender: Option<TabId>, message: Message) -> Option<SyncAck> {
        match message {
            Message::UpdateTodos { todos } => match self.notify(sender, todos).await {
                Ok(ack) => Some(ack),
                Err(e) => {
                    log::error!("[RELAY] Failed to persist todos: {}", e);
                    Some(SyncAck::failed())
                }
            },
            Message::SyncTodos { .. } => None,
        }
    }
}
