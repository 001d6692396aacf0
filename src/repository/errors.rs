use thiserror::Error;

/// Failures raised by storage backends.
///
/// "Document absent" is never an error here; readers return `Option` and
/// writers report it through their return values.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("bookmark {0} already exists")]
    Conflict(String),
    #[error("stored value is invalid: {0}")]
    ValidationError(String),
    #[error("in-memory store lock poisoned")]
    Poisoned,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
