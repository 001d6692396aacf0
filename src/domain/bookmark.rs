use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BookmarkCategory, BookmarkDescription, BookmarkId, BookmarkTitle, BookmarkUrl, UserId,
};

/// A bookmark document, addressed by `(id, user_id)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub user_id: UserId,
    pub title: BookmarkTitle,
    pub url: BookmarkUrl,
    pub description: Option<BookmarkDescription>,
    pub category: BookmarkCategory,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new [`Bookmark`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBookmark {
    pub user_id: UserId,
    pub title: BookmarkTitle,
    pub url: BookmarkUrl,
    pub description: Option<BookmarkDescription>,
    pub category: BookmarkCategory,
    pub tags: Vec<String>,
}

impl NewBookmark {
    /// Stamps identity and timestamps onto the input. Both timestamps share
    /// the same instant.
    pub fn into_bookmark(self, id: BookmarkId, now: DateTime<Utc>) -> Bookmark {
        Bookmark {
            id,
            user_id: self.user_id,
            title: self.title,
            url: self.url,
            description: self.description,
            category: self.category,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update of a [`Bookmark`]. `None` leaves a field untouched.
///
/// `description` is doubly optional: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkChanges {
    pub title: Option<BookmarkTitle>,
    pub url: Option<BookmarkUrl>,
    pub description: Option<Option<BookmarkDescription>>,
    pub category: Option<BookmarkCategory>,
    pub tags: Option<Vec<String>>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Bookmark {
    /// Merges `changes` into the document and refreshes `updated_at`.
    ///
    /// Identity fields and `created_at` are not reachable from
    /// [`BookmarkChanges`], so they survive every merge.
    pub fn apply(&mut self, changes: BookmarkChanges, now: DateTime<Utc>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(url) = changes.url {
            self.url = url;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        self.updated_at = now.max(self.created_at);
    }

    /// Whether any of the requested tags is attached to this bookmark.
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.tags.contains(tag))
    }
}
