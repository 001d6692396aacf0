use std::collections::HashMap;

use diesel::prelude::*;

use crate::domain::bookmark::Bookmark;
use crate::domain::types::{BookmarkId, UserId};
use crate::models::bookmark::{
    Bookmark as DbBookmark, BookmarkReplacement, NewBookmark as DbNewBookmark, NewBookmarkTag,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BookmarkListQuery, BookmarkReader, BookmarkWriter, DieselRepository, StorageHealth,
    StorageStatus,
};

/// Loads the ordered tags of `bookmark_ids`, keyed by bookmark id.
fn load_tags(
    conn: &mut SqliteConnection,
    user_id: &str,
    bookmark_ids: &[&str],
) -> QueryResult<HashMap<String, Vec<String>>> {
    use crate::schema::bookmark_tags;

    let rows = bookmark_tags::table
        .filter(bookmark_tags::user_id.eq(user_id))
        .filter(bookmark_tags::bookmark_id.eq_any(bookmark_ids.iter().copied()))
        .order((bookmark_tags::bookmark_id.asc(), bookmark_tags::position.asc()))
        .select((bookmark_tags::bookmark_id, bookmark_tags::tag))
        .load::<(String, String)>(conn)?;

    let mut tags: HashMap<String, Vec<String>> = HashMap::new();
    for (bookmark_id, tag) in rows {
        tags.entry(bookmark_id).or_default().push(tag);
    }
    Ok(tags)
}

fn insert_tags(conn: &mut SqliteConnection, bookmark: &Bookmark) -> QueryResult<()> {
    use crate::schema::bookmark_tags;

    for row in NewBookmarkTag::for_bookmark(bookmark) {
        diesel::insert_into(bookmark_tags::table)
            .values(&row)
            .execute(conn)?;
    }
    Ok(())
}

fn delete_tags(conn: &mut SqliteConnection, id: &str, user_id: &str) -> QueryResult<usize> {
    use crate::schema::bookmark_tags;

    diesel::delete(
        bookmark_tags::table
            .filter(bookmark_tags::user_id.eq(user_id))
            .filter(bookmark_tags::bookmark_id.eq(id)),
    )
    .execute(conn)
}

fn attach_tags(
    rows: Vec<DbBookmark>,
    mut tags: HashMap<String, Vec<String>>,
) -> RepositoryResult<Vec<Bookmark>> {
    let bookmarks = rows
        .into_iter()
        .map(|row| {
            let row_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_domain(row_tags)
        })
        .collect::<Result<Vec<Bookmark>, _>>()?;
    Ok(bookmarks)
}

impl BookmarkReader for DieselRepository {
    fn get_bookmark_by_id(
        &self,
        id: &BookmarkId,
        user_id: &UserId,
    ) -> RepositoryResult<Option<Bookmark>> {
        use crate::schema::bookmarks;

        let mut conn = self.conn()?;

        let row = bookmarks::table
            .filter(bookmarks::user_id.eq(user_id.as_str()))
            .filter(bookmarks::id.eq(id.as_str()))
            .first::<DbBookmark>(&mut conn)
            .optional()?;

        let Some(row) = row else {
            return Ok(None);
        };

        let tags = load_tags(&mut conn, user_id.as_str(), &[id.as_str()])?;
        Ok(attach_tags(vec![row], tags)?.pop())
    }

    fn list_bookmarks(&self, query: BookmarkListQuery) -> RepositoryResult<(usize, Vec<Bookmark>)> {
        use crate::schema::{bookmark_tags, bookmarks};

        let mut conn = self.conn()?;

        let user_id = query.user_id.as_str();
        let category = query.category.as_deref();
        let tag_filter = query.tag_filter();

        let query_builder = || {
            let mut items = bookmarks::table
                .filter(bookmarks::user_id.eq(user_id))
                .into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category) = category {
                items = items.filter(bookmarks::category.eq(category));
            }

            if let Some(tags) = tag_filter {
                items = items.filter(
                    bookmarks::id.eq_any(
                        bookmark_tags::table
                            .filter(bookmark_tags::user_id.eq(user_id))
                            .filter(bookmark_tags::tag.eq_any(tags.iter().map(String::as_str)))
                            .select(bookmark_tags::bookmark_id),
                    ),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((bookmarks::created_at.desc(), bookmarks::id.asc()));
        if let Some(pagination) = &query.pagination {
            // An offset beyond i64 lies past any stored row.
            let Ok(offset) = i64::try_from(pagination.offset()) else {
                return Ok((total, Vec::new()));
            };
            let limit = i64::try_from(pagination.per_page).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let rows = items.load::<DbBookmark>(&mut conn)?;
        let ids = rows.iter().map(|row| row.id.as_str()).collect::<Vec<_>>();
        let tags = load_tags(&mut conn, user_id, &ids)?;

        Ok((total, attach_tags(rows, tags)?))
    }

    fn list_used_categories(&self, user_id: &UserId) -> RepositoryResult<Vec<String>> {
        use crate::schema::bookmarks;

        let mut conn = self.conn()?;

        let categories = bookmarks::table
            .filter(bookmarks::user_id.eq(user_id.as_str()))
            .select(bookmarks::category)
            .distinct()
            .load::<String>(&mut conn)?;

        Ok(categories)
    }
}

impl BookmarkWriter for DieselRepository {
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Bookmark> {
        use crate::schema::bookmarks;

        let mut conn = self.conn()?;
        let db_bookmark = DbNewBookmark::from(bookmark);

        conn.transaction(|conn| {
            diesel::insert_into(bookmarks::table)
                .values(&db_bookmark)
                .execute(conn)?;
            insert_tags(conn, bookmark)
        })?;

        Ok(bookmark.clone())
    }

    fn replace_bookmark(&self, bookmark: &Bookmark) -> RepositoryResult<Option<Bookmark>> {
        use crate::schema::bookmarks;

        let mut conn = self.conn()?;
        let id = bookmark.id.as_str();
        let user_id = bookmark.user_id.as_str();

        let affected = conn.transaction(|conn| {
            let affected = diesel::update(
                bookmarks::table
                    .filter(bookmarks::user_id.eq(user_id))
                    .filter(bookmarks::id.eq(id)),
            )
            .set(BookmarkReplacement::from(bookmark))
            .execute(conn)?;

            if affected > 0 {
                delete_tags(conn, id, user_id)?;
                insert_tags(conn, bookmark)?;
            }

            QueryResult::Ok(affected)
        })?;

        Ok((affected > 0).then(|| bookmark.clone()))
    }

    fn delete_bookmark(&self, id: &BookmarkId, user_id: &UserId) -> RepositoryResult<bool> {
        use crate::schema::bookmarks;

        let mut conn = self.conn()?;

        let affected = conn.transaction(|conn| {
            delete_tags(conn, id.as_str(), user_id.as_str())?;
            diesel::delete(
                bookmarks::table
                    .filter(bookmarks::user_id.eq(user_id.as_str()))
                    .filter(bookmarks::id.eq(id.as_str())),
            )
            .execute(conn)
        })?;

        Ok(affected > 0)
    }
}

impl StorageHealth for DieselRepository {
    fn storage_status(&self) -> StorageStatus {
        let ping = self
            .conn()
            .and_then(|mut conn| Ok(diesel::sql_query("SELECT 1").execute(&mut conn)?));

        match ping {
            Ok(_) => StorageStatus::Connected,
            Err(e) => {
                log::error!("Database health check failed: {e}");
                StorageStatus::Error
            }
        }
    }
}
