//! Widget Controller
//!
//! Per-tab owner of the widget state. Headless: it drives a [`WidgetView`]
//! and talks to storage and the relay through traits, so the browser layer
//! only supplies implementations.
//!
//! State lives behind a `RefCell` that is never held across an await, so
//! mutations issued while an earlier one is still persisting interleave in
//! call order and the last write wins.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::config::WidgetConfig;
use crate::drag::{DragSession, Point, Size};
use crate::error::SyncResult;
use crate::message::{Message, SyncAck};
use crate::state::{Position, StorageChanges, StoredState, WidgetState};
use crate::storage::StateStore;
use crate::todo::{Todo, TodoId};

/// Sends a tab's updates to the background relay
#[async_trait(?Send)]
pub trait RelayClient {
    async fn update_todos(&self, todos: &[Todo]) -> SyncResult<()>;
}

/// Whatever displays the widget
pub trait WidgetView {
    /// Redraw the list
    fn render(&self, todos: &[Todo]);
    /// Apply the minimized class and button glyph
    fn set_minimized(&self, minimized: bool);
    /// Move the container
    fn set_position(&self, position: &Position);
    /// Toggle the dragging class
    fn set_dragging(&self, _dragging: bool) {}
}

/// Source of creation timestamps for new ids
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock via chrono
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// One tab's widget controller
pub struct WidgetController<S, R, V, C = SystemClock> {
    state: RefCell<WidgetState>,
    drag: RefCell<Option<DragSession>>,
    store: S,
    relay: R,
    view: V,
    clock: C,
    config: WidgetConfig,
}

impl<S, R, V> WidgetController<S, R, V, SystemClock>
where
    S: StateStore,
    R: RelayClient,
    V: WidgetView,
{
    pub fn new(store: S, relay: R, view: V, config: WidgetConfig) -> Self {
        Self::with_clock(store, relay, view, config, SystemClock)
    }
}

impl<S, R, V, C> WidgetController<S, R, V, C>
where
    S: StateStore,
    R: RelayClient,
    V: WidgetView,
    C: Clock,
{
    pub fn with_clock(store: S, relay: R, view: V, config: WidgetConfig, clock: C) -> Self {
        let state = WidgetState {
            position: config.default_position.clone(),
            ..Default::default()
        };
        Self {
            state: RefCell::new(state),
            drag: RefCell::new(None),
            store,
            relay,
            view,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.to_vec()
    }

    pub fn is_minimized(&self) -> bool {
        self.state.borrow().is_minimized
    }

    pub fn position(&self) -> Position {
        self.state.borrow().position.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.borrow().is_some()
    }

    // ========================
    // Lifecycle
    // ========================

    /// Read persisted state and paint everything.
    ///
    /// A failed read leaves the defaults in place.
    pub async fn load(&self) {
        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                log::error!("[WIDGET] Error loading saved state: {}", e);
                StoredState::default()
            }
        };
        let state = stored.into_widget_state(&self.config);
        log::debug!("[WIDGET] Loaded {} todos", state.todos.len());
        *self.state.borrow_mut() = state;

        let state = self.state.borrow().clone();
        self.view.set_position(&state.position);
        self.view.set_minimized(state.is_minimized);
        self.view.render(state.todos.items());
    }

    // ========================
    // Mutations
    // ========================

    /// Append a todo. Blank input is ignored.
    pub async fn add(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let now = self.clock.now_ms();
        self.state.borrow_mut().todos.add(text, now);
        self.save_and_sync().await;
    }

    pub async fn toggle(&self, id: TodoId) {
        if !self.state.borrow_mut().todos.toggle(id) {
            log::debug!("[WIDGET] toggle: no todo {}", id);
        }
        self.save_and_sync().await;
    }

    pub async fn delete(&self, id: TodoId) {
        if !self.state.borrow_mut().todos.delete(id) {
            log::debug!("[WIDGET] delete: no todo {}", id);
        }
        self.save_and_sync().await;
    }

    /// Replace a todo's text. Blank or unchanged text does nothing.
    pub async fn edit(&self, id: TodoId, text: &str) {
        let text = text.trim();
        let changed = {
            let mut state = self.state.borrow_mut();
            let unchanged = state.todos.get(id).map_or(true, |todo| todo.text == text);
            !text.is_empty() && !unchanged && state.todos.edit(id, text)
        };
        if changed {
            self.save_and_sync().await;
        }
    }

    pub async fn toggle_minimize(&self) {
        let minimized = {
            let mut state = self.state.borrow_mut();
            state.is_minimized = !state.is_minimized;
            state.is_minimized
        };
        self.view.set_minimized(minimized);
        if let Err(e) = self.store.save(StoredState::with_minimized(minimized)).await {
            log::error!("[WIDGET] Error saving minimized state: {}", e);
        }
    }

    /// Persist the full list, ask the relay to fan it out, then re-render.
    async fn save_and_sync(&self) {
        let snapshot = self.todos();
        if let Err(e) = self.store.save(StoredState::with_todos(snapshot.clone())).await {
            log::error!("[WIDGET] Error saving todos: {}", e);
        }
        if let Err(e) = self.relay.update_todos(&snapshot).await {
            log::error!("[WIDGET] Error broadcasting update: {}", e);
        }
        let current = self.todos();
        self.view.render(&current);
    }

    // ========================
    // Drag
    // ========================

    /// Pointer went down on the drag handle
    pub fn begin_drag(&self, pointer: Point, widget_origin: Point) {
        *self.drag.borrow_mut() = Some(DragSession::begin(pointer, widget_origin));
        self.view.set_dragging(true);
    }

    /// Pointer moved; returns the new placement while a drag is active
    pub fn drag_to(&self, pointer: Point, viewport: Size, widget: Size) -> Option<Position> {
        let session = (*self.drag.borrow())?;
        let origin = session.origin_for(pointer, viewport, widget);
        let position = Position::anchored_at(origin);
        self.state.borrow_mut().position = position.clone();
        self.view.set_position(&position);
        Some(position)
    }

    /// Pointer released; persists the final placement
    pub async fn end_drag(&self) {
        if self.drag.borrow_mut().take().is_none() {
            return;
        }
        self.view.set_dragging(false);
        let position = self.position();
        if let Err(e) = self.store.save(StoredState::with_position(position)).await {
            log::error!("[WIDGET] Error saving position: {}", e);
        }
    }

    // ========================
    // Reconciliation
    // ========================

    /// Merge a storage change event from `area`
    pub fn apply_storage_changes(&self, area: &str, changes: &StorageChanges) {
        if area != self.config.storage_area {
            return;
        }
        if let Some(change) = &changes.todos {
            let todos = change.new_value.clone().unwrap_or_default();
            self.replace_todos(todos);
        }
        if let Some(change) = &changes.is_minimized {
            let minimized = change.new_value.unwrap_or(false);
            self.state.borrow_mut().is_minimized = minimized;
            self.view.set_minimized(minimized);
        }
        if let Some(change) = &changes.position {
            let position = change
                .new_value
                .clone()
                .unwrap_or_else(|| self.config.default_position.clone());
            self.state.borrow_mut().position = position.clone();
            self.view.set_position(&position);
        }
    }

    /// Handle a direct message from the relay; `None` means no reply
    pub fn handle_message(&self, message: Message) -> Option<SyncAck> {
        match message {
            Message::SyncTodos { todos } => {
                self.replace_todos(todos);
                Some(SyncAck::ok())
            }
            Message::UpdateTodos { .. } => None,
        }
    }

    fn replace_todos(&self, todos: Vec<Todo>) {
        self.state.borrow_mut().todos.replace(todos);
        let current = self.todos();
        self.view.render(&current);
    }
}
