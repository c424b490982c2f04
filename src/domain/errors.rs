use thiserror::Error;

/// Reasons the store refuses an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("invalid index {index}: list has {len} item(s)")]
    InvalidIndex { index: usize, len: usize },
    #[error("no todo ids left to assign")]
    IdsExhausted,
}

pub type StoreResult<T> = Result<T, StoreError>;
