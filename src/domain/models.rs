use serde::{Deserialize, Serialize};
use std::fmt;

/// A single task as submitted through the form: text plus completion flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub description: String,
    pub done: bool,
}

impl TodoItem {
    /// Creates a pending item with the given description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            done: false,
        }
    }
}

/// Stable identifier the store assigns to every stored item.
///
/// Actions still address items by position; the id lets the view keep track
/// of "the same" item across deletions that shift positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A stored todo: the submitted item plus its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: TodoId,
    #[serde(flatten)]
    pub item: TodoItem,
}

/// Snapshot of the whole list.
///
/// Snapshots are never modified once handed out; every transition builds a
/// new one (see [`crate::domain::apply`]). Snapshots only come from
/// [`initial_state`] and the reducer, so `next_id` is always past every
/// listed id.
///
/// # Examples
///
/// ```
/// use todolist::domain::TodoListState;
///
/// let state = TodoListState::default();
/// assert!(state.todos.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TodoListState {
    pub todos: Vec<Todo>,
    /// Id handed to the next added item. Never decreases.
    pub next_id: u64,
}

impl TodoListState {
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Todo> {
        self.todos.get(position)
    }

    /// Current position of the item with the given id, if it is still listed.
    pub fn position_of(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }

    /// The submitted items in display order, without ids.
    pub fn items(&self) -> impl Iterator<Item = &TodoItem> {
        self.todos.iter().map(|todo| &todo.item)
    }

    pub fn done_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.item.done).count()
    }
}

/// The state every session starts from: no todos.
pub fn initial_state() -> TodoListState {
    TodoListState::default()
}
