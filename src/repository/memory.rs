use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::bookmark::Bookmark;
use crate::domain::types::{BookmarkId, UserId};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    BookmarkListQuery, BookmarkReader, BookmarkWriter, StorageHealth, StorageStatus,
};

/// Process-local bookmark store used when no database is configured.
///
/// Clones share the same underlying list, so one instance created in the
/// composition root is visible to every request for the lifetime of the
/// process. Tests construct their own isolated instances.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    bookmarks: Arc<Mutex<Vec<Bookmark>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with existing documents.
    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        Self {
            bookmarks: Arc::new(Mutex::new(bookmarks)),
        }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Vec<Bookmark>>> {
        self.bookmarks.lock().map_err(|_| RepositoryError::Poisoned)
    }

    fn matches(bookmark: &Bookmark, id: &BookmarkId, user_id: &UserId) -> bool {
        bookmark.id == *id && bookmark.user_id == *user_id
    }
}

impl BookmarkReader for InMemoryRepository {
    fn get_bookmark_by_id(
        &self,
        id: &BookmarkId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<Bookmark>> {
        Ok(self
            .lock()?
            .iter()
            .find(|b| Self::matches(b, id, user_id))
            .cloned())
    }

    fn list_bookmarks(&self, query: BookmarkListQuery) -> RepositoryResult<(usize, Vec<Bookmark>)> {
        let mut items: Vec<Bookmark> = self
            .lock()?
            .iter()
            .filter(|b| b.user_id == query.user_id)
            .cloned()
            .collect();

        if let Some(category) = query.category.as_deref() {
            items.retain(|b| b.category.as_str() == category);
        }
        if let Some(tags) = query.tag_filter() {
            items.retain(|b| b.has_any_tag(tags));
        }

        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = items.len();
        if let Some(pagination) = &query.pagination {
            items = items
                .into_iter()
                .skip(pagination.offset())
                .take(pagination.per_page)
                .collect();
        }

        Ok((total, items))
    }

    fn list_used_categories(&self, user_id: &UserId) -> RepositoryResult<Vec<String>> {
        let categories: BTreeSet<String> = self
            .lock()?
            .iter()
            .filter(|b| b.user_id == *user_id)
            .map(|b| b.category.as_str().to_string())
            .collect();
        Ok(categories.into_iter().collect())
    }
}

impl BookmarkWriter for InMemoryRepository {
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Bookmark> {
        let mut bookmarks = self.lock()?;
        if bookmarks
            .iter()
            .any(|b| Self::matches(b, &bookmark.id, &bookmark.user_id))
        {
            return Err(RepositoryError::Conflict(bookmark.id.to_string()));
        }
        bookmarks.push(bookmark.clone());
        log::info!("Created bookmark in memory storage: {}", bookmark.title);
        Ok(bookmark.clone())
    }

    fn replace_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Option<Bookmark>> {
        let mut bookmarks = self.lock()?;
        let Some(slot) = bookmarks
            .iter_mut()
            .find(|b| Self::matches(b, &bookmark.id, &bookmark.user_id))
        else {
            return Ok(None);
        };
        *slot = bookmark.clone();
        log::info!("Updated bookmark in memory storage: {}", bookmark.title);
        Ok(Some(bookmark.clone()))
    }

    fn delete_bookmark(&self, id: &BookmarkId, user_id: &UserId) -> RepositoryResult<bool> {
        let mut bookmarks = self.lock()?;
        match bookmarks.iter().position(|b| Self::matches(b, id, user_id)) {
            Some(index) => {
                let removed = bookmarks.remove(index);
                log::info!("Deleted bookmark from memory storage: {}", removed.title);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl StorageHealth for InMemoryRepository {
    fn storage_status(&self) -> StorageStatus {
        StorageStatus::Disconnected
    }
}
