mod config;
mod db;
mod errors;
mod handlers;
mod middlewares;
mod models;
mod repository;
mod routes;
mod services;
mod state;
mod structs;
mod tasks;
mod utils;

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::Logger, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use crate::config::app_config::AppConfig;
use crate::db::mongodb::get_database;
use crate::middlewares::cors::cors;
use crate::repository::link_repository::LinkRepository;
use crate::repository::mongo_link_repository::MongoLinkRepository;
use crate::routes::init_routes;
use crate::services::link_service::LinkService;
use crate::state::app_state::AppState;
use crate::tasks::expiry_sweeper::spawn_expiry_sweeper;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize the database connection
    let db = match get_database(&config).await {
        Ok(db) => db,
        Err(e) => {
            error!("MongoDB connection failed: {}", e);
            std::process::exit(1);
        }
    };

    let mongo_repository = MongoLinkRepository::new(db);
    if let Err(e) = mongo_repository.ensure_indexes().await {
        warn!("Could not create indexes, lookups will scan: {}", e);
    }
    let repository: Arc<dyn LinkRepository> = Arc::new(mongo_repository);

    if let Some(interval) = config.expiry_sweep_interval {
        spawn_expiry_sweeper(repository.clone(), interval);
    }

    // Create shared state
    let app_state = web::Data::new(AppState {
        links: LinkService::new(repository, config.base_url.clone()),
    });

    info!(
        "Server running on {}:{}, short URLs under {}",
        config.bind_address, config.port, config.base_url
    );

    HttpServer::new(move || {
        let logger = Logger::new("%a \"%r\" %s %b \"%{Referer}i\" \"%{User-Agent}i\" %D ms");
        App::new()
            .wrap(logger)
            .wrap(cors())
            .app_data(app_state.clone())
            .configure(init_routes)
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
