//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
///
/// Every failure leaving the core is one of these four kinds; raw redb and
/// serde errors are folded into [`AppError::Storage`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Expired")]
    Expired,

    #[error("Short code collision persisted after {attempts} attempts")]
    Conflict { attempts: u32 },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Persistence-layer failure details.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Message(String),
}

impl AppError {
    /// Build a storage error from a plain message.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(StorageError::Message(message.into()))
    }
}

impl From<redb::Error> for AppError {
    fn from(value: redb::Error) -> Self {
        Self::Storage(value.into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Storage(value.into())
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::from(redb::Error::from(value))
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::from(redb::Error::from(value))
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::from(redb::Error::from(value))
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::from(redb::Error::from(value))
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::from(redb::Error::from(value))
    }
}
