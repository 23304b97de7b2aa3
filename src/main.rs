use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::info;

use weekend_traveller_api::{config::AppConfig, db, routes, state::AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::from_env();

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    info!("Logger initialized");

    if !cfg!(debug_assertions) {
        info!("Release mode");
    }

    let mongo_uri = config
        .mongodb_uri
        .clone()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "MONGODB_URI must be set"))?;
    let client = db::mongo::create_mongo_client(&mongo_uri, &config.mongodb_db_name)
        .await
        .map_err(io::Error::other)?;

    let analytics_pool = db::sqlite::create_analytics_pool(&config.analytics_database_url)
        .await
        .map_err(io::Error::other)?;

    info!(
        "Media providers configured: {:?}",
        config.media.configured_providers()
    );

    let host = config.host.clone();
    let port = config.port;
    let state = AppState::build(config, client, analytics_pool);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
