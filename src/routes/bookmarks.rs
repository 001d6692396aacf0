use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::domain::bookmark::{BookmarkChanges, NewBookmark};
use crate::dto::bookmarks::{BookmarkDto, BookmarkListDto, CategoriesDto};
use crate::forms::bookmarks::{
    CreateBookmarkForm, ListBookmarksForm, ListBookmarksPayload, UpdateBookmarkForm, UserQuery,
};
use crate::repository::BookmarkRepository;
use crate::routes::{not_found, service_error_response};
use crate::services::bookmarks::{
    create_bookmark as create_bookmark_service, delete_bookmark as delete_bookmark_service,
    get_bookmark as get_bookmark_service, list_bookmarks as list_bookmarks_service,
    list_categories as list_categories_service, update_bookmark as update_bookmark_service,
};

#[post("/bookmarks")]
pub async fn create_bookmark(
    repo: web::Data<dyn BookmarkRepository>,
    web::Json(form): web::Json<CreateBookmarkForm>,
) -> impl Responder {
    let new_bookmark: NewBookmark = match form.try_into() {
        Ok(new_bookmark) => new_bookmark,
        Err(e) => return service_error_response(e.into()),
    };

    match create_bookmark_service(new_bookmark, repo.get_ref()) {
        Ok(bookmark) => HttpResponse::Created().json(BookmarkDto::from(bookmark)),
        Err(err) => service_error_response(err),
    }
}

#[get("/bookmarks")]
pub async fn list_bookmarks(
    repo: web::Data<dyn BookmarkRepository>,
    web::Query(form): web::Query<ListBookmarksForm>,
) -> impl Responder {
    let payload: ListBookmarksPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(e.into()),
    };
    let (page, page_size) = (payload.page, payload.page_size);

    match list_bookmarks_service(payload, repo.get_ref()) {
        Ok((bookmarks, total)) => HttpResponse::Ok().json(BookmarkListDto {
            bookmarks: bookmarks.into_iter().map(BookmarkDto::from).collect(),
            total,
            page,
            page_size,
        }),
        Err(err) => service_error_response(err),
    }
}

#[get("/bookmarks/categories")]
pub async fn list_categories(
    repo: web::Data<dyn BookmarkRepository>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match list_categories_service(&query.user_id, repo.get_ref()) {
        Ok(categories) => HttpResponse::Ok().json(CategoriesDto { categories }),
        Err(err) => service_error_response(err),
    }
}

#[get("/bookmarks/{id}")]
pub async fn get_bookmark(
    repo: web::Data<dyn BookmarkRepository>,
    id: web::Path<String>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match get_bookmark_service(&id, &query.user_id, repo.get_ref()) {
        Ok(Some(bookmark)) => HttpResponse::Ok().json(BookmarkDto::from(bookmark)),
        Ok(None) => not_found(),
        Err(err) => service_error_response(err),
    }
}

#[put("/bookmarks/{id}")]
pub async fn update_bookmark(
    repo: web::Data<dyn BookmarkRepository>,
    id: web::Path<String>,
    query: web::Query<UserQuery>,
    web::Json(form): web::Json<UpdateBookmarkForm>,
) -> impl Responder {
    let changes: BookmarkChanges = match form.try_into() {
        Ok(changes) => changes,
        Err(e) => return service_error_response(e.into()),
    };

    match update_bookmark_service(&id, changes, &query.user_id, repo.get_ref()) {
        Ok(Some(bookmark)) => HttpResponse::Ok().json(BookmarkDto::from(bookmark)),
        Ok(None) => not_found(),
        Err(err) => service_error_response(err),
    }
}

#[delete("/bookmarks/{id}")]
pub async fn delete_bookmark(
    repo: web::Data<dyn BookmarkRepository>,
    id: web::Path<String>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    match delete_bookmark_service(&id, &query.user_id, repo.get_ref()) {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => not_found(),
        Err(err) => service_error_response(err),
    }
}
