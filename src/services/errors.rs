use thiserror::Error;

/// Generic error type used by service layer functions.
///
/// A missing bookmark is not an error: lookups return `Option` and deletes
/// return `bool`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Input rejected before any storage call was made.
    #[error("{0}")]
    Validation(String),
    /// The storage backend failed.
    #[error("{0}")]
    Storage(String),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
