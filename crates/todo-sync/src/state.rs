//! Widget State
//!
//! In-memory widget state and its persisted form in the shared key-value store.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::WidgetConfig;
use crate::drag::Point;
use crate::error::SyncResult;
use crate::todo::{Todo, TodoList};

/// Storage key for the todo array
pub const KEY_TODOS: &str = "todos";
/// Storage key for the minimized flag
pub const KEY_IS_MINIMIZED: &str = "isMinimized";
/// Storage key for the widget position
pub const KEY_POSITION: &str = "position";

/// Every key the widget reads on startup
pub const STATE_KEYS: [&str; 3] = [KEY_TODOS, KEY_IS_MINIMIZED, KEY_POSITION];

/// Widget placement as CSS lengths
///
/// Starts right-anchored. Once dragged it is left/top-anchored with
/// `right: auto` for good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub top: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl Position {
    pub fn right_anchored(top: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            left: None,
            right: Some(right.into()),
        }
    }

    /// Left/top anchored placement for a dragged widget
    pub fn anchored_at(point: Point) -> Self {
        Self {
            top: format!("{}px", point.y),
            left: Some(format!("{}px", point.x)),
            right: Some("auto".to_string()),
        }
    }

    /// Inline CSS for the container
    pub fn to_style(&self) -> String {
        let mut style = format!("top: {};", self.top);
        if let Some(left) = &self.left {
            style.push_str(&format!(" left: {};", left));
        }
        if let Some(right) = &self.right {
            style.push_str(&format!(" right: {};", right));
        }
        style
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::right_anchored("20px", "20px")
    }
}

/// Live widget state owned by one tab
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetState {
    pub todos: TodoList,
    pub is_minimized: bool,
    pub position: Position,
}

/// Partial view of the persisted keys
///
/// Used both for reads (missing keys are `None`) and for writes (only the
/// present keys are written).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<Vec<Todo>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_minimized: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl StoredState {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: Some(todos),
            ..Default::default()
        }
    }

    pub fn with_minimized(is_minimized: bool) -> Self {
        Self {
            is_minimized: Some(is_minimized),
            ..Default::default()
        }
    }

    pub fn with_position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Decode a storage snapshot key by key.
    ///
    /// A malformed key is dropped with a warning; the other keys survive.
    pub fn from_json_lossy(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            if !value.is_null() {
                log::warn!("[STATE] Ignoring non-object storage snapshot");
            }
            return Self::default();
        };
        Self {
            todos: decode_key(map, KEY_TODOS),
            is_minimized: decode_key(map, KEY_IS_MINIMIZED),
            position: decode_key(map, KEY_POSITION),
        }
    }

    pub fn to_json(&self) -> SyncResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Copy the present keys of `other` over this one
    pub fn merge(&mut self, other: StoredState) {
        if other.todos.is_some() {
            self.todos = other.todos;
        }
        if other.is_minimized.is_some() {
            self.is_minimized = other.is_minimized;
        }
        if other.position.is_some() {
            self.position = other.position;
        }
    }

    /// Resolve into live state, filling gaps from config defaults
    pub fn into_widget_state(self, config: &WidgetConfig) -> WidgetState {
        WidgetState {
            todos: TodoList::new(self.todos.unwrap_or_default()),
            is_minimized: self.is_minimized.unwrap_or(false),
            position: self.position.unwrap_or_else(|| config.default_position.clone()),
        }
    }
}

fn decode_key<T: DeserializeOwned>(map: &Map<String, Value>, key: &str) -> Option<T> {
    let value = map.get(key)?;
    if value.is_null() {
        return None;
    }
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            log::warn!("[STATE] Malformed '{}' in storage, using default: {}", key, e);
            None
        }
    }
}

/// One key's change notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageChange<T> {
    /// Absent when the key was removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<T>,
}

impl<T> StorageChange<T> {
    pub fn set(value: T) -> Self {
        Self {
            new_value: Some(value),
        }
    }

    pub fn removed() -> Self {
        Self { new_value: None }
    }
}

/// Change notification for the widget's keys in one storage area
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todos: Option<StorageChange<Vec<Todo>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_minimized: Option<StorageChange<bool>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<StorageChange<Position>>,
}

impl StorageChanges {
    /// Changes produced by writing `update`
    pub fn from_update(update: &StoredState) -> Self {
        Self {
            todos: update.todos.clone().map(StorageChange::set),
            is_minimized: update.is_minimized.map(StorageChange::set),
            position: update.position.clone().map(StorageChange::set),
        }
    }

    /// Decode a change event key by key, dropping malformed keys
    pub fn from_json_lossy(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            todos: decode_key(map, KEY_TODOS),
            is_minimized: decode_key(map, KEY_IS_MINIMIZED),
            position: decode_key(map, KEY_POSITION),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_none() && self.is_minimized.is_none() && self.position.is_none()
    }
}
