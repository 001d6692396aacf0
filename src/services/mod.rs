pub mod bookmarks;
pub mod errors;
pub mod main;

pub use errors::{ServiceError, ServiceResult};
