use storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Storage(e) if e.is_not_found())
    }
}
