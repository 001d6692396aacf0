use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::bookmark::Bookmark as DomainBookmark;
use crate::domain::types::{
    BookmarkCategory, BookmarkDescription, BookmarkId, BookmarkTitle, BookmarkUrl,
    TypeConstraintError, UserId,
};

/// Diesel model representing a row in the `bookmarks` table.
///
/// Tags live in `bookmark_tags` and are attached when converting to the
/// domain type.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bookmarks)]
#[diesel(primary_key(user_id, id))]
pub struct Bookmark {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Bookmark`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookmarks)]
pub struct NewBookmark<'a> {
    pub id: &'a str,
    pub user_id: &'a str,
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub category: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Full-document replacement of the mutable columns.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::bookmarks)]
#[diesel(treat_none_as_null = true)]
pub struct BookmarkReplacement<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub category: &'a str,
    pub updated_at: NaiveDateTime,
}

/// One ordered tag of a bookmark.
#[derive(Insertable)]
#[diesel(table_name = crate::schema::bookmark_tags)]
pub struct NewBookmarkTag<'a> {
    pub user_id: &'a str,
    pub bookmark_id: &'a str,
    pub position: i32,
    pub tag: &'a str,
}

impl<'a> From<&'a DomainBookmark> for NewBookmark<'a> {
    fn from(bookmark: &'a DomainBookmark) -> Self {
        Self {
            id: bookmark.id.as_str(),
            user_id: bookmark.user_id.as_str(),
            title: bookmark.title.as_str(),
            url: bookmark.url.as_str(),
            description: bookmark.description.as_ref().map(BookmarkDescription::as_str),
            category: bookmark.category.as_str(),
            created_at: bookmark.created_at.naive_utc(),
            updated_at: bookmark.updated_at.naive_utc(),
        }
    }
}

impl<'a> From<&'a DomainBookmark> for BookmarkReplacement<'a> {
    fn from(bookmark: &'a DomainBookmark) -> Self {
        Self {
            title: bookmark.title.as_str(),
            url: bookmark.url.as_str(),
            description: bookmark.description.as_ref().map(BookmarkDescription::as_str),
            category: bookmark.category.as_str(),
            updated_at: bookmark.updated_at.naive_utc(),
        }
    }
}

impl<'a> NewBookmarkTag<'a> {
    /// Rows for every tag of `bookmark`, preserving order.
    pub fn for_bookmark(bookmark: &'a DomainBookmark) -> Vec<Self> {
        bookmark
            .tags
            .iter()
            .enumerate()
            .map(|(position, tag)| Self {
                user_id: bookmark.user_id.as_str(),
                bookmark_id: bookmark.id.as_str(),
                position: position as i32,
                tag: tag.as_str(),
            })
            .collect()
    }
}

impl Bookmark {
    /// Converts the row into a domain bookmark carrying `tags`.
    pub fn into_domain(self, tags: Vec<String>) -> Result<DomainBookmark, TypeConstraintError> {
        Ok(DomainBookmark {
            id: BookmarkId::new(self.id),
            user_id: UserId::new(self.user_id),
            title: BookmarkTitle::new(self.title)?,
            url: BookmarkUrl::new(self.url)?,
            description: self.description.map(BookmarkDescription::new).transpose()?,
            category: BookmarkCategory::try_from(self.category)?,
            tags,
            created_at: self.created_at.and_utc(),
            updated_at: self.updated_at.and_utc(),
        })
    }
}
