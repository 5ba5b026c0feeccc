//! Widget Configuration
//!
//! Tunables shared by the controller and the view.

use serde::{Deserialize, Serialize};

use crate::state::Position;

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WidgetConfig {
    /// Display text is cut to this many words
    pub word_limit: usize,
    /// Literal token replaced by the current time at render time
    pub time_shortcut: String,
    /// Placement before the widget is ever dragged
    pub default_position: Position,
    /// Storage area whose change events are reconciled
    pub storage_area: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            word_limit: 50,
            time_shortcut: ">time".to_string(),
            default_position: Position::default(),
            storage_area: "local".to_string(),
        }
    }
}
