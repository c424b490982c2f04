//! The state transition function of the todo list.
//!
//! [`apply`] is pure: it reads the given snapshot and returns a new one,
//! leaving the input untouched. Positions outside the list are rejected
//! instead of stretching or corrupting the sequence.

use super::action::Action;
use super::errors::{StoreError, StoreResult};
use super::models::{Todo, TodoId, TodoItem, TodoListState};

/// Applies one action to a snapshot and returns the next snapshot.
///
/// # Errors
///
/// Returns [`StoreError::InvalidIndex`] when a `Done` or `Delete` action
/// names a position at or past the end of the list, and
/// [`StoreError::IdsExhausted`] when an `Add` finds no id left to assign.
///
/// # Examples
///
/// ```
/// use todolist::domain::{apply, initial_state, Action};
///
/// let state = apply(&initial_state(), &Action::add("buy milk")).unwrap();
/// let state = apply(&state, &Action::done(0)).unwrap();
/// assert!(state.todos[0].item.done);
///
/// let state = apply(&state, &Action::delete(0)).unwrap();
/// assert!(state.todos.is_empty());
/// ```
pub fn apply(state: &TodoListState, action: &Action) -> StoreResult<TodoListState> {
    match action {
        Action::Add { todo } => add(state, todo),
        Action::Done { id } => mark_done(state, *id),
        Action::Delete { id } => delete(state, *id),
        Action::Unknown => Ok(state.clone()),
    }
}

fn add(state: &TodoListState, todo: &TodoItem) -> StoreResult<TodoListState> {
    let next_id = state.next_id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
    let mut todos = Vec::with_capacity(state.todos.len() + 1);
    todos.extend_from_slice(&state.todos);
    todos.push(Todo {
        id: TodoId(state.next_id),
        item: todo.clone(),
    });
    Ok(TodoListState { todos, next_id })
}

fn mark_done(state: &TodoListState, index: usize) -> StoreResult<TodoListState> {
    check_index(state, index)?;
    let mut next = state.clone();
    let current = &state.todos[index];
    next.todos[index] = Todo {
        item: TodoItem {
            done: true,
            ..current.item.clone()
        },
        ..current.clone()
    };
    Ok(next)
}

fn delete(state: &TodoListState, index: usize) -> StoreResult<TodoListState> {
    check_index(state, index)?;
    let mut next = state.clone();
    next.todos.remove(index);
    Ok(next)
}

fn check_index(state: &TodoListState, index: usize) -> StoreResult<()> {
    if index < state.todos.len() {
        Ok(())
    } else {
        Err(StoreError::InvalidIndex {
            index,
            len: state.todos.len(),
        })
    }
}
