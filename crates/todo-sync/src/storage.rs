//! State Storage
//!
//! Abstract shared key-value store plus an in-memory implementation that
//! emulates change notifications.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;

use crate::error::{SyncError, SyncResult};
use crate::state::{StorageChanges, StoredState};

/// Shared key-value store holding the widget keys
#[async_trait(?Send)]
pub trait StateStore {
    /// Read every widget key; missing keys are `None`
    async fn load(&self) -> SyncResult<StoredState>;

    /// Write only the keys present in `update`
    async fn save(&self, update: StoredState) -> SyncResult<()>;
}

type ChangeListener = Box<dyn Fn(&StorageChanges)>;

#[derive(Default)]
struct MemoryInner {
    data: StoredState,
    listeners: Vec<ChangeListener>,
    fail_writes: bool,
}

/// In-memory store shared by clones, firing listeners after each write
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(data: StoredState) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().data = data;
        store
    }

    /// Current contents
    pub fn snapshot(&self) -> StoredState {
        self.inner.borrow().data.clone()
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Register a change listener (like `storage.onChanged`)
    pub fn subscribe(&self, listener: impl Fn(&StorageChanges) + 'static) {
        self.inner.borrow_mut().listeners.push(Box::new(listener));
    }
}

#[async_trait(?Send)]
impl StateStore for MemoryStore {
    async fn load(&self) -> SyncResult<StoredState> {
        Ok(self.snapshot())
    }

    async fn save(&self, update: StoredState) -> SyncResult<()> {
        let changes = {
            let mut inner = self.inner.borrow_mut();
            if inner.fail_writes {
                return Err(SyncError::Storage("write rejected".to_string()));
            }
            let changes = StorageChanges::from_update(&update);
            inner.data.merge(update);
            changes
        };
        if changes.is_empty() {
            return Ok(());
        }
        // Listeners may call back into the store, so no borrow is held here.
        let listeners = std::mem::take(&mut self.inner.borrow_mut().listeners);
        for listener in &listeners {
            listener(&changes);
        }
        let mut inner = self.inner.borrow_mut();
        let added = std::mem::replace(&mut inner.listeners, listeners);
        inner.listeners.extend(added);
        Ok(())
    }
}
