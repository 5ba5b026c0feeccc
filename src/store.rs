//! Widget State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. The controller
//! writes here through [`StoreView`]; components only read.

use leptos::prelude::*;
use reactive_stores::Store;
use todo_sync::{Position, Todo, WidgetConfig, WidgetView};

/// What the widget currently shows
#[derive(Clone, Debug, Default, Store)]
pub struct WidgetStore {
    pub todos: Vec<Todo>,
    pub is_minimized: bool,
    pub position: Position,
    pub dragging: bool,
}

impl WidgetStore {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            position: config.default_position.clone(),
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<WidgetStore>;

/// Controller-facing view writing into the store
#[derive(Clone, Copy)]
pub struct StoreView {
    store: AppStore,
}

impl StoreView {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl WidgetView for StoreView {
    fn render(&self, todos: &[Todo]) {
        *self.store.todos().write() = todos.to_vec();
    }

    fn set_minimized(&self, minimized: bool) {
        *self.store.is_minimized().write() = minimized;
    }

    fn set_position(&self, position: &Position) {
        *self.store.position().write() = position.clone();
    }

    fn set_dragging(&self, dragging: bool) {
        *self.store.dragging().write() = dragging;
    }
}

/// Container classes for the current flags
pub fn container_class(minimized: bool, dragging: bool) -> String {
    let mut class = String::from("todo-container");
    if minimized {
        class.push_str(" minimized");
    }
    if dragging {
        class.push_str(" dragging");
    }
    class
}

/// Footer line: how many todos are still open
pub fn footer_text(todos: &[Todo]) -> String {
    let open = todos.iter().filter(|todo| !todo.completed).count();
    format!("{} open · synced across tabs", open)
}

/// Minimize button glyph
pub fn minimize_glyph(minimized: bool) -> &'static str {
    if minimized {
        "[ + ]"
    } else {
        "[ - ]"
    }
}
