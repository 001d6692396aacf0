use std::collections::BTreeSet;

use chrono::Utc;

use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::domain::types::{BookmarkCategory, BookmarkId, UserId};
use crate::forms::bookmarks::ListBookmarksPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{BookmarkListQuery, BookmarkReader, BookmarkWriter, MAX_ITEMS_PER_PAGE};

use super::{ServiceError, ServiceResult};

fn storage_error(action: &str, e: RepositoryError) -> ServiceError {
    log::error!("Failed to {action}: {e}");
    ServiceError::Storage(e.to_string())
}

/// Assigns a fresh id and timestamps and stores the bookmark.
pub fn create_bookmark<R>(new_bookmark: NewBookmark, repo: &R) -> ServiceResult<Bookmark>
where
    R: BookmarkWriter + ?Sized,
{
    let bookmark = new_bookmark.into_bookmark(BookmarkId::generate(), Utc::now());

    repo.create_bookmark(&bookmark)
        .map_err(|e| storage_error("create bookmark", e))
}

pub fn get_bookmark<R>(id: &str, user_id: &str, repo: &R) -> ServiceResult<Option<Bookmark>>
where
    R: BookmarkReader + ?Sized,
{
    let (id, user_id) = (BookmarkId::new(id), UserId::new(user_id));

    repo.get_bookmark_by_id(&id, &user_id)
        .map_err(|e| storage_error("get bookmark", e))
}

/// Returns the requested page (newest first) and the total number of matches.
pub fn list_bookmarks<R>(
    payload: ListBookmarksPayload,
    repo: &R,
) -> ServiceResult<(Vec<Bookmark>, usize)>
where
    R: BookmarkReader + ?Sized,
{
    let page_size = payload.page_size.clamp(1, MAX_ITEMS_PER_PAGE);

    let mut query = BookmarkListQuery::new(payload.user_id).paginate(payload.page, page_size);
    if let Some(category) = payload.category {
        query = query.category(category);
    }
    if let Some(tags) = payload.tags {
        query = query.tags(tags);
    }

    match repo.list_bookmarks(query) {
        Ok((total, bookmarks)) => Ok((bookmarks, total)),
        Err(e) => Err(storage_error("list bookmarks", e)),
    }
}

/// Applies the present fields of `changes` to an existing bookmark.
///
/// Returns `Ok(None)` when the bookmark does not exist for this user.
pub fn update_bookmark<R>(
    id: &str,
    changes: BookmarkChanges,
    user_id: &str,
    repo: &R,
) -> ServiceResult<Option<Bookmark>>
where
    R: BookmarkReader + BookmarkWriter + ?Sized,
{
    let (id, user_id) = (BookmarkId::new(id), UserId::new(user_id));

    let mut bookmark = match repo.get_bookmark_by_id(&id, &user_id) {
        Ok(Some(bookmark)) => bookmark,
        Ok(None) => return Ok(None),
        Err(e) => return Err(storage_error("get bookmark", e)),
    };

    bookmark.apply(changes, Utc::now());

    repo.replace_bookmark(&bookmark)
        .map_err(|e| storage_error("update bookmark", e))
}

/// Returns whether a bookmark was removed.
pub fn delete_bookmark<R>(id: &str, user_id: &str, repo: &R) -> ServiceResult<bool>
where
    R: BookmarkWriter + ?Sized,
{
    let (id, user_id) = (BookmarkId::new(id), UserId::new(user_id));

    repo.delete_bookmark(&id, &user_id)
        .map_err(|e| storage_error("delete bookmark", e))
}

/// Every predefined category plus any other value stored for the user,
/// sorted and without duplicates.
pub fn list_categories<R>(user_id: &str, repo: &R) -> ServiceResult<Vec<String>>
where
    R: BookmarkReader + ?Sized,
{
    let user_id = UserId::new(user_id);

    let used = repo
        .list_used_categories(&user_id)
        .map_err(|e| storage_error("list categories", e))?;

    let categories: BTreeSet<String> = BookmarkCategory::ALL
        .iter()
        .map(|c| c.as_str().to_string())
        .chain(used)
        .collect();

    Ok(categories.into_iter().collect())
}
