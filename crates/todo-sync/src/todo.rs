//! Todo Entity
//!
//! A single checklist entry and the ordered list the widget owns.

use serde::{Deserialize, Deserializer, Serialize};

/// Todo identifier (creation time in milliseconds, bumped to stay unique)
pub type TodoId = i64;

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier within the list
    #[serde(deserialize_with = "deserialize_id")]
    pub id: TodoId,
    /// Raw text as typed (shortcuts are expanded only at render time)
    pub text: String,
    /// Completion status
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    pub fn new(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// JS numbers arrive as doubles; accept any integral one
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TodoId, D::Error> {
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = TodoId;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("an integral todo id")
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<TodoId, E> {
            Ok(v)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<TodoId, E> {
            TodoId::try_from(v).map_err(E::custom)
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<TodoId, E> {
            if v.fract() == 0.0 && v.abs() < 9_007_199_254_740_992.0 {
                Ok(v as TodoId)
            } else {
                Err(E::custom(format!("todo id {} is not an integer", v)))
            }
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Ordered todo list in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<Todo>,
}

impl TodoList {
    pub fn new(items: Vec<Todo>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Todo> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    /// Replace the whole list (reconciliation)
    pub fn replace(&mut self, items: Vec<Todo>) {
        self.items = items;
    }

    /// Next id for a todo created at `now_ms`.
    ///
    /// Never below `now_ms`, always above every id already in the list, so
    /// two adds inside the same millisecond still get distinct ids.
    pub fn next_id(&self, now_ms: i64) -> TodoId {
        match self.items.iter().map(|todo| todo.id).max() {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        }
    }

    /// Append a new uncompleted todo and return it
    pub fn add(&mut self, text: impl Into<String>, now_ms: i64) -> &Todo {
        let id = self.next_id(now_ms);
        self.items.push(Todo::new(id, text));
        &self.items[self.items.len() - 1]
    }

    /// Flip completion. Returns false if the id is unknown.
    pub fn toggle(&mut self, id: TodoId) -> bool {
        match self.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.completed = !todo.completed;
                true
            }
            None => false,
        }
    }

    /// Remove by id. Returns false if the id is unknown.
    pub fn delete(&mut self, id: TodoId) -> bool {
        let before = self.items.len();
        self.items.retain(|todo| todo.id != id);
        self.items.len() != before
    }

    /// Replace the text of one todo, keeping id and completion.
    /// Returns false if the id is unknown.
    pub fn edit(&mut self, id: TodoId, text: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|todo| todo.id == id) {
            Some(todo) => {
                todo.text = text.into();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_toggle_edit_delete() {
        let mut list = TodoList::default();
        let id = list.add("buy milk", 1_000).id;
        assert_eq!(list.items(), &[Todo::new(1_000, "buy milk")]);

        assert!(list.toggle(id));
        assert!(list.get(id).unwrap().completed);

        assert!(list.edit(id, "buy oat milk"));
        let todo = list.get(id).unwrap();
        assert_eq!(todo.text, "buy oat milk");
        assert_eq!(todo.id, id);
        assert!(todo.completed);

        assert!(list.delete(id));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut list = TodoList::default();
        let a = list.add("a", 5).id;
        let b = list.add("b", 5).id;
        let c = list.add("c", 3).id;
        assert_eq!((a, b, c), (5, 6, 7));
        assert_eq!(list.next_id(100), 100);
    }

    #[test]
    fn test_unknown_id_is_untouched() {
        let mut list = TodoList::new(vec![Todo::new(1, "x")]);
        assert!(!list.toggle(2));
        assert!(!list.edit(2, "y"));
        assert!(!list.delete(2));
        assert_eq!(list.items(), &[Todo::new(1, "x")]);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut list = TodoList::default();
        list.add("first", 30);
        list.add("second", 10);
        list.add("third", 20);
        let texts: Vec<_> = list.items().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_id_accepts_integral_double() {
        let todo: Todo = serde_json::from_str(r#"{"id":1700000000123.0,"text":"t","completed":true}"#).unwrap();
        assert_eq!(todo.id, 1_700_000_000_123);
        assert!(serde_json::from_str::<Todo>(r#"{"id":1.5,"text":"t"}"#).is_err());
    }

    #[test]
    fn test_completed_defaults_when_missing() {
        let todo: Todo = serde_json::from_str(r#"{"id":7,"text":"hi"}"#).unwrap();
        assert_eq!(todo, Todo::new(7, "hi"));
    }
}
