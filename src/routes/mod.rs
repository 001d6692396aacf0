use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};

use crate::dto::bookmarks::ErrorDto;
use crate::services::ServiceError;

pub mod bookmarks;
pub mod main;

/// Registers every route of the service.
///
/// The categories route is registered before `/bookmarks/{id}` so that
/// `categories` is never captured as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(main::index)
        .service(main::health)
        .service(
            web::scope("/api/v1")
                .service(bookmarks::create_bookmark)
                .service(bookmarks::list_bookmarks)
                .service(bookmarks::list_categories)
                .service(bookmarks::get_bookmark)
                .service(bookmarks::update_bookmark)
                .service(bookmarks::delete_bookmark),
        );
}

/// Rejects malformed JSON bodies with 422 and a `detail` message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = unprocessable(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

/// Rejects unparsable query strings with 422 and a `detail` message.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let response = unprocessable(err.to_string());
        InternalError::from_response(err, response).into()
    })
}

pub fn unprocessable(detail: impl Into<String>) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ErrorDto::new(detail))
}

pub fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorDto::new("Bookmark not found"))
}

/// Maps a service failure onto its HTTP status.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(message) => unprocessable(message),
        ServiceError::Storage(message) => {
            HttpResponse::InternalServerError().json(ErrorDto::new(message))
        }
    }
}
