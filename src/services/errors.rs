use thiserror::Error;

use crate::pagination::PaginationError;
use crate::repository::errors::RepositoryError;

/// Classification of a [`ServiceError`], compared directly by callers that
/// need to branch on the failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Parse,
    Validation,
    Decode,
    Config,
    Persistence,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("course '{id}' not found")]
    NotFound { id: String },

    #[error("error parsing value: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("error decoding request: {0}")]
    Decode(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("persistence error: {0}")]
    Persistence(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound { .. } => ErrorKind::NotFound,
            ServiceError::Parse(_) => ErrorKind::Parse,
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Decode(_) => ErrorKind::Decode,
            ServiceError::Config(_) => ErrorKind::Config,
            ServiceError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        ServiceError::NotFound { id: id.into() }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Persistence(err)
    }
}

impl From<PaginationError> for ServiceError {
    fn from(err: PaginationError) -> Self {
        ServiceError::Config(err.to_string())
    }
}
