use diesel::r2d2::{Error as R2D2Error, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Failures reported by the course store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No course row matched the lookup or write.
    #[error("course record not found")]
    NotFound,

    #[error("course store error: {0}")]
    DatabaseError(String),

    /// A stored or submitted value could not be converted.
    #[error("invalid course data: {0}")]
    ValidationError(String),

    #[error("course store unavailable: {0}")]
    ConnectionError(String),

    #[error("course constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("unexpected course store failure: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

fn constraint_label(kind: &DatabaseErrorKind) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some("duplicate course id"),
        DatabaseErrorKind::NotNullViolation => Some("missing course column"),
        DatabaseErrorKind::CheckViolation => Some("course check"),
        _ => None,
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(kind, info) => match constraint_label(&kind) {
                Some(label) => {
                    RepositoryError::ConstraintViolation(format!("{label}: {}", info.message()))
                }
                None => RepositoryError::DatabaseError(info.message().to_string()),
            },
            DieselError::SerializationError(e) | DieselError::DeserializationError(e) => {
                RepositoryError::ValidationError(e.to_string())
            }
            DieselError::QueryBuilderError(e) => RepositoryError::Unexpected(e.to_string()),
            other => RepositoryError::Unexpected(other.to_string()),
        }
    }
}

impl From<R2D2Error> for RepositoryError {
    fn from(err: R2D2Error) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}

impl From<PoolError> for RepositoryError {
    fn from(err: PoolError) -> Self {
        RepositoryError::ConnectionError(err.to_string())
    }
}
