use log::info;
use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::app_config::AppConfig;

pub const DEFAULT_DATABASE_NAME: &str = "shortqr";

/// Connect to MongoDB and make sure the server answers before serving traffic.
pub async fn get_database(config: &AppConfig) -> mongodb::error::Result<Database> {
    let client = Client::with_uri_str(&config.database_url).await?;

    let db = match &config.database_name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE_NAME)),
    };

    db.run_command(doc! { "ping": 1 }).await?;
    info!("Connected to MongoDB database {}", db.name());

    Ok(db)
}
