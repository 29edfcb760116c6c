//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Paste not found")]
    NotFound,

    #[error("Unauthorized: you can only modify your own pastes")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl AppError {
    /// Whether this error originated in the persistence layer.
    ///
    /// # Returns
    /// `true` for database, serialization and raw storage failures.
    pub fn is_store_failure(&self) -> bool {
        matches!(
            self,
            AppError::Database(_) | AppError::StorageMessage(_) | AppError::Serialization(_)
        )
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn store_failures_are_distinct_from_domain_errors() {
        assert!(AppError::StorageMessage("boom".to_string()).is_store_failure());
        assert!(!AppError::NotFound.is_store_failure());
        assert!(!AppError::Unauthorized.is_store_failure());
        assert!(!AppError::BadRequest("title".to_string()).is_store_failure());
        assert!(!AppError::Conflict("email".to_string()).is_store_failure());
    }

    #[test]
    fn not_found_and_unauthorized_render_different_messages() {
        assert_ne!(
            AppError::NotFound.to_string(),
            AppError::Unauthorized.to_string()
        );
    }
}
