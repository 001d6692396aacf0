use crate::domain::bookmark::Bookmark;
use crate::domain::types::{BookmarkId, UserId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BookmarkListQuery, BookmarkReader, BookmarkWriter, StorageHealth, StorageStatus,
};

/// Repository whose every call fails, used to exercise storage error paths.
#[derive(Default)]
pub struct FailingRepository;

fn unavailable<T>() -> RepositoryResult<T> {
    Err(RepositoryError::Database(
        diesel::result::Error::BrokenTransactionManager,
    ))
}

impl BookmarkReader for FailingRepository {
    fn get_bookmark_by_id(
        &self,
        _id: &BookmarkId,
        _user_id: &UserId,
    ) -> RepositoryResult<Option<Bookmark>> {
        unavailable()
    }

    fn list_bookmarks(
        &self,
        _query: BookmarkListQuery,
    ) -> RepositoryResult<(usize, Vec<Bookmark>)> {
        unavailable()
    }

    fn list_used_categories(&self, _user_id: &UserId) -> RepositoryResult<Vec<String>> {
        unavailable()
    }
}

impl BookmarkWriter for FailingRepository {
    fn create_bookmark(&self, _bookmark: &Bookmark) -> RepositoryResult<Bookmark> {
        unavailable()
    }

    fn replace_bookmark(&self, _bookmark: &Bookmark) -> RepositoryResult<Option<Bookmark>> {
        unavailable()
    }

    fn delete_bookmark(&self, _id: &BookmarkId, _user_id: &UserId) -> RepositoryResult<bool> {
        unavailable()
    }
}

impl StorageHealth for FailingRepository {
    fn storage_status(&self) -> StorageStatus {
        StorageStatus::Error
    }
}
