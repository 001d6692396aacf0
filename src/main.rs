use std::sync::Arc;

use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{App, HttpServer, web};
use bookmarks_api::models::config::ServerConfig;
use bookmarks_api::repository::{BookmarkRepository, open_repository};
use bookmarks_api::routes::configure;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let repo: Arc<dyn BookmarkRepository> =
        match open_repository(server_config.database_url(), server_config.debug) {
            Ok(repo) => repo,
            Err(e) => {
                log::error!("Failed to initialize storage: {e}");
                std::process::exit(1);
            }
        };

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting {} {} on {}:{}",
        server_config.app_name,
        server_config.app_version,
        bind_address.0,
        bind_address.1
    );

    let repo = web::Data::from(repo);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(NormalizePath::trim())
            .app_data(repo.clone())
            .app_data(server_config.clone())
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
