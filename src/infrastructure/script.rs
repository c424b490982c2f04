//! Headless replay of action scripts.
//!
//! A script is a JSON array of actions in the wire format described in
//! [`crate::domain::action`]. Replaying starts from the empty list and stops
//! at the first rejected action.

use crate::application::TodoStore;
use crate::domain::{Action, StoreError, TodoListState};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse script: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Action {step} ({action}) rejected: {source}")]
    Rejected {
        step: usize,
        action: Action,
        #[source]
        source: StoreError,
    },
}

pub struct ScriptRunner;

impl ScriptRunner {
    pub fn parse(content: &str) -> Result<Vec<Action>, ScriptError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Applies `actions` in order, starting from the empty list.
    pub fn run(actions: Vec<Action>) -> Result<TodoListState, ScriptError> {
        let mut store = TodoStore::new();
        for (step, action) in actions.into_iter().enumerate() {
            store
                .dispatch(action.clone())
                .map_err(|source| ScriptError::Rejected { step, action, source })?;
        }
        info!(len = store.state().len(), "script replayed");
        Ok(store.into_state())
    }

    pub fn run_file(path: &Path) -> Result<TodoListState, ScriptError> {
        let content = fs::read_to_string(path).map_err(|e| ScriptError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::run(Self::parse(&content)?)
    }

    pub fn render_state(state: &TodoListState) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(state)?)
    }
}
