use bookmarks_api::domain::bookmark::Bookmark;
use bookmarks_api::domain::types::{BookmarkCategory, BookmarkId, BookmarkTitle, UserId};
use bookmarks_api::repository::{
    BookmarkListQuery, BookmarkReader, BookmarkWriter, DieselRepository, StorageHealth,
    StorageStatus,
};
use bookmarks_api::schema::bookmark_tags;
use chrono::{Duration, TimeZone, Utc};
use diesel::prelude::*;

mod common;

fn stored(
    id: &str,
    user: &str,
    minutes: i64,
    category: BookmarkCategory,
    tags: &[&str],
) -> Bookmark {
    let created =
        Utc.with_ymd_and_hms(2025, 8, 11, 10, 0, 0).unwrap() + Duration::minutes(minutes);
    common::new_bookmark(user, &format!("Bookmark {id}"), category, tags)
        .into_bookmark(BookmarkId::new(id), created)
}

fn user(id: &str) -> UserId {
    UserId::new(id)
}

#[test]
fn create_and_get_round_trips_every_field() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("a", "u1", 0, BookmarkCategory::Work, &["rust", "web", "api"]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");

    let loaded = repo
        .get_bookmark_by_id(&bookmark.id, &user("u1"))
        .expect("should query bookmark")
        .expect("bookmark should exist");
    assert_eq!(loaded, bookmark);
    assert_eq!(loaded.tags, ["rust", "web", "api"]);
}

#[test]
fn get_requires_matching_owner() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("a", "u1", 0, BookmarkCategory::Work, &[]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");

    let foreign = repo
        .get_bookmark_by_id(&bookmark.id, &user("u2"))
        .expect("should query bookmark");
    assert!(foreign.is_none());
}

#[test]
fn duplicate_key_is_rejected() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("a", "u1", 0, BookmarkCategory::Work, &[]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");
    assert!(repo.create_bookmark(&bookmark).is_err());
}

#[test]
fn list_orders_newest_first_and_counts_before_paging() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (id, minutes) in [("old", 0), ("new", 2), ("mid", 1)] {
        repo.create_bookmark(&stored(id, "u1", minutes, BookmarkCategory::Other, &[]))
            .expect("should create bookmark");
    }
    repo.create_bookmark(&stored("foreign", "u2", 5, BookmarkCategory::Other, &[]))
        .expect("should create bookmark");

    let (total, page) = repo
        .list_bookmarks(BookmarkListQuery::new(user("u1")).paginate(1, 2))
        .expect("should list bookmarks");
    assert_eq!(total, 3);
    let ids: Vec<&str> = page.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["new", "mid"]);

    let (total, page) = repo
        .list_bookmarks(BookmarkListQuery::new(user("u1")).paginate(2, 2))
        .expect("should list bookmarks");
    assert_eq!(total, 3);
    let ids: Vec<&str> = page.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["old"]);

    let (total, page) = repo
        .list_bookmarks(BookmarkListQuery::new(user("u1")).paginate(3, 2))
        .expect("should list bookmarks");
    assert_eq!(total, 3);
    assert!(page.is_empty());
}

#[test]
fn page_far_past_the_end_is_empty() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    for (id, minutes) in [("a", 0), ("b", 1), ("c", 2)] {
        repo.create_bookmark(&stored(id, "u1", minutes, BookmarkCategory::Other, &[]))
            .expect("should create bookmark");
    }

    for page in [4, 1_000_000_000_000_000_000, usize::MAX] {
        let (total, items) = repo
            .list_bookmarks(BookmarkListQuery::new(user("u1")).paginate(page, 50))
            .expect("should list bookmarks");
        assert_eq!(total, 3, "page {page}");
        assert!(items.is_empty(), "page {page}");
    }
}

#[test]
fn owner_and_id_match_verbatim() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("a", " u1", 0, BookmarkCategory::Work, &[]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");

    let loaded = repo
        .get_bookmark_by_id(&bookmark.id, &user(" u1"))
        .expect("should query bookmark")
        .expect("bookmark should exist");
    assert_eq!(loaded.user_id, " u1");

    for owner in ["u1", " u1 ", ""] {
        let found = repo
            .get_bookmark_by_id(&bookmark.id, &user(owner))
            .expect("should query bookmark");
        assert!(found.is_none(), "{owner:?}");
    }
    let found = repo
        .get_bookmark_by_id(&BookmarkId::new(" a"), &user(" u1"))
        .expect("should query bookmark");
    assert!(found.is_none());
}

#[test]
fn list_filters_by_any_tag_and_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_bookmark(&stored("a", "u1", 0, BookmarkCategory::Work, &["rust", "web"]))
        .expect("should create bookmark");
    repo.create_bookmark(&stored("b", "u1", 1, BookmarkCategory::News, &["go"]))
        .expect("should create bookmark");
    repo.create_bookmark(&stored("c", "u1", 2, BookmarkCategory::Work, &["python"]))
        .expect("should create bookmark");

    let (total, page) = repo
        .list_bookmarks(
            BookmarkListQuery::new(user("u1"))
                .tags(vec!["rust".into(), "go".into(), "web".into()])
                .paginate(1, 50),
        )
        .expect("should list bookmarks");
    assert_eq!(total, 2);
    let ids: Vec<&str> = page.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);

    let (total, page) = repo
        .list_bookmarks(BookmarkListQuery::new(user("u1")).category("work"))
        .expect("should list bookmarks");
    assert_eq!(total, 2);
    assert!(page.iter().all(|b| b.category == BookmarkCategory::Work));

    let (total, _) = repo
        .list_bookmarks(
            BookmarkListQuery::new(user("u1"))
                .category("work")
                .tags(vec!["go".into()]),
        )
        .expect("should list bookmarks");
    assert_eq!(total, 0);
}

#[test]
fn replace_overwrites_fields_and_tags() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let mut bookmark = stored("a", "u1", 0, BookmarkCategory::Work, &["one", "two"]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");

    bookmark.title = BookmarkTitle::new("Renamed").expect("valid title");
    bookmark.description = None;
    bookmark.tags = vec!["three".into()];
    bookmark.updated_at = bookmark.created_at + Duration::minutes(5);

    let replaced = repo
        .replace_bookmark(&bookmark)
        .expect("should replace bookmark");
    assert_eq!(replaced.as_ref(), Some(&bookmark));

    let loaded = repo
        .get_bookmark_by_id(&bookmark.id, &user("u1"))
        .expect("should query bookmark")
        .expect("bookmark should exist");
    assert_eq!(loaded, bookmark);
}

#[test]
fn replace_of_missing_bookmark_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("ghost", "u1", 0, BookmarkCategory::Work, &["x"]);
    let replaced = repo
        .replace_bookmark(&bookmark)
        .expect("should run replace");
    assert!(replaced.is_none());

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let tag_rows: i64 = bookmark_tags::table
        .count()
        .get_result(&mut conn)
        .expect("should count tags");
    assert_eq!(tag_rows, 0);
}

#[test]
fn delete_removes_bookmark_and_tags() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let bookmark = stored("a", "u1", 0, BookmarkCategory::Work, &["x", "y"]);
    repo.create_bookmark(&bookmark).expect("should create bookmark");

    assert!(!repo
        .delete_bookmark(&bookmark.id, &user("u2"))
        .expect("should run delete"));
    assert!(repo
        .delete_bookmark(&bookmark.id, &user("u1"))
        .expect("should run delete"));
    assert!(!repo
        .delete_bookmark(&bookmark.id, &user("u1"))
        .expect("should run delete"));

    let mut conn = test_db.pool().get().expect("should acquire DB connection");
    let tag_rows: i64 = bookmark_tags::table
        .count()
        .get_result(&mut conn)
        .expect("should count tags");
    assert_eq!(tag_rows, 0);
}

#[test]
fn used_categories_are_distinct_per_user() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    repo.create_bookmark(&stored("a", "u1", 0, BookmarkCategory::Work, &[]))
        .expect("should create bookmark");
    repo.create_bookmark(&stored("b", "u1", 1, BookmarkCategory::Work, &[]))
        .expect("should create bookmark");
    repo.create_bookmark(&stored("c", "u2", 2, BookmarkCategory::News, &[]))
        .expect("should create bookmark");

    let categories = repo
        .list_used_categories(&user("u1"))
        .expect("should list categories");
    assert_eq!(categories, ["work"]);
}

#[test]
fn reports_connected_status() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    assert_eq!(repo.storage_status(), StorageStatus::Connected);
}
