//! Extension Message Protocol
//!
//! Messages exchanged between tabs and the background relay.

use serde::{Deserialize, Serialize};

use crate::todo::Todo;

/// Browser tab identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i32);

/// Messages on the extension bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Tab -> relay after a local mutation
    UpdateTodos {
        #[serde(default)]
        todos: Vec<Todo>,
    },
    /// Relay -> every tab except the originator
    SyncTodos {
        #[serde(default)]
        todos: Vec<Todo>,
    },
}

/// Reply to a handled message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAck {
    pub success: bool,
}

impl SyncAck {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let msg = Message::SyncTodos { todos: vec![Todo::new(3, "x")] };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "type": "SYNC_TODOS", "todos": [{ "id": 3, "text": "x", "completed": false }] })
        );
        assert_eq!(serde_json::to_value(SyncAck::ok()).unwrap(), json!({ "success": true }));
    }

    #[test]
    fn test_missing_todos_is_empty() {
        let msg: Message = serde_json::from_value(json!({ "type": "UPDATE_TODOS" })).unwrap();
        assert_eq!(msg, Message::UpdateTodos { todos: vec![] });
    }

    #[test]
    fn test_unknown_type_rejected() {
        let parsed = serde_json::from_value::<Message>(json!({ "type": "PING" }));
        assert!(parsed.is_err());
    }
}
