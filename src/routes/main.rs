use actix_web::{HttpResponse, Responder, get, web};

use crate::models::config::ServerConfig;
use crate::repository::BookmarkRepository;
use crate::services::main::{health_check, service_info};

#[get("/")]
pub async fn index(server_config: web::Data<ServerConfig>) -> impl Responder {
    HttpResponse::Ok().json(service_info(&server_config))
}

#[get("/health")]
pub async fn health(
    repo: web::Data<dyn BookmarkRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    HttpResponse::Ok().json(health_check(&server_config, repo.get_ref()))
}
