//! Ownership of the current todo list snapshot.
//!
//! The [`TodoStore`] holds exactly one [`TodoListState`] and swaps it for a
//! new snapshot on every accepted action. Views receive a [`Dispatcher`]
//! borrowed from the store instead of reaching for shared globals.

use crate::domain::{apply, initial_state, Action, StoreResult, TodoListState};
use tracing::{debug, warn};

/// Holder of the current snapshot.
///
/// # Examples
///
/// ```
/// use todolist::application::TodoStore;
/// use todolist::domain::Action;
///
/// let mut store = TodoStore::default();
/// store.dispatch(Action::add("buy milk")).unwrap();
/// assert_eq!(store.state().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TodoStore {
    state: TodoListState,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            state: initial_state(),
        }
    }

    /// The current snapshot. Always complete; never partially updated.
    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn into_state(self) -> TodoListState {
        self.state
    }

    /// Runs the reducer and keeps the result.
    ///
    /// On error the held snapshot is left as it was.
    pub fn dispatch(&mut self, action: Action) -> StoreResult<()> {
        debug!(
            kind = action.kind(),
            action = %action,
            len = self.state.len(),
            "dispatching action"
        );
        match apply(&self.state, &action) {
            Ok(next) => {
                self.state = next;
                Ok(())
            }
            Err(err) => {
                warn!(action = %action, error = %err, "action rejected");
                Err(err)
            }
        }
    }

    /// A gesture-level handle for the view layer.
    pub fn dispatcher(&mut self) -> Dispatcher<'_> {
        Dispatcher { store: self }
    }
}

/// Maps user gestures onto actions.
///
/// Positions passed in must come from the snapshot the user is looking at;
/// never keep one across a dispatch.
pub struct Dispatcher<'a> {
    store: &'a mut TodoStore,
}

impl Dispatcher<'_> {
    /// Form submission: a new pending item.
    pub fn add_todo(&mut self, description: impl Into<String>) -> StoreResult<()> {
        self.store.dispatch(Action::add(description))
    }

    pub fn done_todo(&mut self, position: usize) -> StoreResult<()> {
        self.store.dispatch(Action::done(position))
    }

    pub fn delete_todo(&mut self, position: usize) -> StoreResult<()> {
        self.store.dispatch(Action::delete(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StoreError, TodoId};

    #[test]
    fn test_store_starts_empty() {
        let store = TodoStore::new();
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_dispatch_replaces_snapshot() {
        let mut store = TodoStore::new();
        let before = store.state().clone();
        store.dispatch(Action::add("a")).unwrap();
        assert_ne!(store.state(), &before);
        assert_eq!(store.state().todos[0].item.description, "a");
    }

    #[test]
    fn test_rejected_dispatch_keeps_snapshot() {
        let mut store = TodoStore::new();
        store.dispatch(Action::add("a")).unwrap();
        let before = store.state().clone();

        let err = store.dispatch(Action::delete(3)).unwrap_err();
        assert_eq!(err, StoreError::InvalidIndex { index: 3, len: 1 });
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_unknown_action_is_ignored() {
        let mut store = TodoStore::new();
        store.dispatch(Action::add("a")).unwrap();
        let before = store.state().clone();
        store.dispatch(Action::Unknown).unwrap();
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_dispatcher_gestures() {
        let mut store = TodoStore::new();
        {
            let mut dispatcher = store.dispatcher();
            dispatcher.add_todo("A").unwrap();
            dispatcher.add_todo("B").unwrap();
            dispatcher.done_todo(1).unwrap();
            dispatcher.delete_todo(0).unwrap();
        }
        assert_eq!(store.state().len(), 1);

        let state = store.into_state();
        assert_eq!(state.todos[0].id, TodoId(1));
        assert_eq!(state.todos[0].item.description, "B");
        assert!(state.todos[0].item.done);
    }
}
