mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;
mod structs;
mod utils;

use crate::config::settings::Settings;
use crate::db::mongo_store::MongoStore;
use crate::state::app_state::AppState;
use actix_cors::Cors;
use actix_web::{App, HttpServer, http, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use routes::init_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize the database connection
    let (client, db) = match db::mongodb::connect(&settings).await {
        Ok(handles) => handles,
        Err(e) => {
            log::error!("Error connecting to the database: {:#}", e);
            std::process::exit(1);
        }
    };
    db::mongodb::ensure_indexes(&db).await;

    let bind = (settings.bind_address.clone(), settings.port);
    let allowed_origins = settings.allowed_origins.clone();

    // Create shared state
    let app_state = web::Data::new(AppState::new(settings, Arc::new(MongoStore::new(db))));

    log::info!("Listening on {}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        // Create a logger with a custom format instead
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "PUT"])
            .allowed_headers(vec![http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);
        App::new()
            .wrap(logger)
            .wrap(cors)
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind(bind)?
    .run()
    .await?;

    // Release pooled connections once the server has drained
    client.shutdown().await;
    Ok(())
}
