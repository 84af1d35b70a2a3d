use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod products;

/// Result type returned by all service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The requested product does not exist.
    #[error("Product not found")]
    NotFound,
    /// The request payload or query parameters failed validation.
    #[error("{0}")]
    Form(String),
    /// The request conflicts with an existing record.
    #[error("{0}")]
    Conflict(String),
    /// The persistence layer failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::DuplicateSku(_) => {
                ServiceError::Conflict("Product with this SKU already exists".to_string())
            }
            RepositoryError::Rule(violation) => ServiceError::Form(violation.to_string()),
            other => ServiceError::Repository(other),
        }
    }
}
