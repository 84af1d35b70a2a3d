use thiserror::Error;

use crate::domain::product::RuleViolation;

/// Result type returned by all repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested record does not exist.
    #[error("record not found")]
    NotFound,
    /// Another record already uses the given SKU.
    #[error("a product with SKU `{0}` already exists")]
    DuplicateSku(String),
    /// The data file exists but does not hold a valid product list.
    #[error("data file is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
    /// A write would have persisted a record violating a business rule.
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    /// Reading or writing the data file failed.
    #[error("data file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// A previous holder of the file lock panicked.
    #[error("data file lock poisoned")]
    LockPoisoned,
}
