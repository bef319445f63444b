use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found")]
    NotFound,

    #[error("Id allocation failed: {0}")]
    Allocation(String),

    #[error("Write failed: {0}")]
    Update(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound)
    }

    pub fn is_write_failure(&self) -> bool {
        matches!(self, StorageError::Update(_) | StorageError::Allocation(_))
    }
}
