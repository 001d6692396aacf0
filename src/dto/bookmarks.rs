use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::bookmark::Bookmark;

/// Wire representation of a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkDto {
    fn from(value: Bookmark) -> Self {
        Self {
            id: value.id.into_inner(),
            user_id: value.user_id.into_inner(),
            title: value.title.into_inner(),
            url: value.url.into_inner(),
            description: value.description.map(|d| d.into_inner()),
            category: value.category.as_str().to_string(),
            tags: value.tags,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// One page of bookmarks together with the unpaginated match count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkListDto {
    pub bookmarks: Vec<BookmarkDto>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoriesDto {
    pub categories: Vec<String>,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDto {
    pub detail: String,
}

impl ErrorDto {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::bookmark::NewBookmark;
    use crate::domain::types::{BookmarkCategory, BookmarkId, BookmarkTitle, BookmarkUrl, UserId};

    #[test]
    fn serializes_expected_fields() {
        let now = Utc.with_ymd_and_hms(2025, 8, 11, 12, 0, 0).unwrap();
        let bookmark = NewBookmark {
            user_id: UserId::default(),
            title: BookmarkTitle::new("Rust").unwrap(),
            url: BookmarkUrl::new("https://www.rust-lang.org").unwrap(),
            description: None,
            category: BookmarkCategory::Education,
            tags: vec!["lang".into()],
        }
        .into_bookmark(BookmarkId::new("abc"), now);

        let json = serde_json::to_value(BookmarkDto::from(bookmark)).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["user_id"], "default_user");
        assert_eq!(json["url"], "https://www.rust-lang.org/");
        assert_eq!(json["category"], "education");
        assert_eq!(json["tags"], serde_json::json!(["lang"]));
        assert!(json["description"].is_null());
        assert_eq!(json["created_at"], json["updated_at"]);
    }
}
