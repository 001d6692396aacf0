//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, but
//! callers still want `?` to work across the boundaries.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::forms::bookmarks::BookmarkFormError;
    use crate::services::ServiceError;

    impl From<BookmarkFormError> for ServiceError {
        fn from(val: BookmarkFormError) -> Self {
            ServiceError::Validation(val.to_string())
        }
    }
}
