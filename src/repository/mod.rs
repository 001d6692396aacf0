use std::sync::Arc;

use crate::db::{DbConnection, DbPool, establish_connection_pool, run_migrations};
use crate::domain::bookmark::Bookmark;
use crate::domain::types::{BookmarkId, UserId};

pub mod bookmark;
pub mod errors;
pub mod memory;
#[cfg(test)]
pub mod test;

use errors::RepositoryResult;
pub use memory::InMemoryRepository;

/// Default number of bookmarks returned per page.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;
/// Largest page size callers may request.
pub const MAX_ITEMS_PER_PAGE: usize = 100;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Number of items preceding the requested page. Page `0` is treated as
    /// page `1`.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1).saturating_mul(self.per_page)
    }
}

/// Query parameters used when listing bookmarks of one user.
#[derive(Debug, Clone)]
pub struct BookmarkListQuery {
    /// Owner of the listed bookmarks.
    pub user_id: UserId,
    /// Exact-match category filter.
    pub category: Option<String>,
    /// Match bookmarks carrying any of these tags.
    pub tags: Option<Vec<String>>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl BookmarkListQuery {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            category: None,
            tags: None,
            pagination: None,
        }
    }
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }

    /// Tag filter, if it names at least one tag.
    pub fn tag_filter(&self) -> Option<&[String]> {
        self.tags.as_deref().filter(|tags| !tags.is_empty())
    }
}

/// Read-only operations for bookmark documents.
pub trait BookmarkReader {
    /// Retrieve a bookmark matching both its identifier and owner.
    fn get_bookmark_by_id(
        &self,
        id: &BookmarkId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<Bookmark>>;
    /// List bookmarks newest first, returning the total match count before
    /// pagination alongside the requested page.
    fn list_bookmarks(&self, query: BookmarkListQuery) -> RepositoryResult<(usize, Vec<Bookmark>)>;
    /// Distinct category values stored for a user.
    fn list_used_categories(&self, user_id: &UserId) -> RepositoryResult<Vec<String>>;
}

/// Write operations for bookmark documents.
pub trait BookmarkWriter {
    /// Persist a new bookmark and return the stored document.
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Bookmark>;
    /// Overwrite the stored document addressed by `(bookmark.id,
    /// bookmark.user_id)`. Returns `None` when no such document exists.
    fn replace_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Option<Bookmark>>;
    /// Delete a bookmark by id and owner. Returns whether a document was removed.
    fn delete_bookmark(&self, id: &BookmarkId, user_id: &UserId) -> RepositoryResult<bool>;
}

/// Reachability of the configured backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStatus {
    /// A database is configured and answers queries.
    Connected,
    /// Running on the in-memory store.
    Disconnected,
    /// A database is configured but cannot be reached.
    Error,
}

impl StorageStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Error => "error",
        }
    }
}

pub trait StorageHealth {
    fn storage_status(&self) -> StorageStatus;
}

/// Everything the HTTP layer needs from a backend.
pub trait BookmarkRepository:
    BookmarkReader + BookmarkWriter + StorageHealth + Send + Sync
{
}

impl<T> BookmarkRepository for T where
    T: BookmarkReader + BookmarkWriter + StorageHealth + Send + Sync
{
}

/// Selects the storage backend once at startup.
///
/// With a database URL the SQLite store is opened and migrated. If that
/// fails and `debug` is set, the in-memory store is used instead.
pub fn open_repository(
    database_url: Option<&str>,
    debug: bool,
) -> RepositoryResult<Arc<dyn BookmarkRepository>> {
    let Some(database_url) = database_url else {
        log::warn!("No database configured. Using in-memory bookmark storage.");
        return Ok(Arc::new(InMemoryRepository::new()));
    };

    let opened = establish_connection_pool(database_url).and_then(|pool| {
        run_migrations(&pool)?;
        Ok(pool)
    });

    match opened {
        Ok(pool) => {
            log::info!("Database initialized successfully");
            Ok(Arc::new(DieselRepository::new(pool)))
        }
        Err(e) if debug => {
            log::error!("Failed to initialize database: {e}");
            log::warn!("Running in debug mode without database");
            Ok(Arc::new(InMemoryRepository::new()))
        }
        Err(e) => Err(e),
    }
}
