//! Helpers for integration tests.

use bookmarks_api::db::{DbPool, establish_connection_pool, run_migrations};
use bookmarks_api::domain::bookmark::NewBookmark;
use bookmarks_api::domain::types::{
    BookmarkCategory, BookmarkDescription, BookmarkTitle, BookmarkUrl, UserId,
};
use tempfile::NamedTempFile;

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        run_migrations(&pool).expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

#[allow(dead_code)]
pub fn new_bookmark(
    user_id: &str,
    title: &str,
    category: BookmarkCategory,
    tags: &[&str],
) -> NewBookmark {
    NewBookmark {
        user_id: UserId::new(user_id),
        title: BookmarkTitle::new(title).expect("valid title"),
        url: BookmarkUrl::new(format!(
            "https://example.com/{}",
            title.to_lowercase().replace(' ', "-")
        ))
        .expect("valid url"),
        description: Some(
            BookmarkDescription::new("A test bookmark").expect("valid description"),
        ),
        category,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
