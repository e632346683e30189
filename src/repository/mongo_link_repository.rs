use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::info;
use mongodb::bson::{self, doc};
use mongodb::{Collection, Database, IndexModel};

use crate::errors::app_error::AppError;
use crate::models::link::Link;
use crate::repository::link_repository::LinkRepository;

pub const URLS_COLLECTION: &str = "urls";

pub struct MongoLinkRepository {
    db: Database,
    urls: Collection<Link>,
}

impl MongoLinkRepository {
    pub fn new(db: Database) -> Self {
        let urls = db.collection::<Link>(URLS_COLLECTION);
        Self { db, urls }
    }

    /// Lookup indexes for both access paths. Neither is unique, so two
    /// concurrent shortens of the same URL can still both insert.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "fullUrl": 1 }).build(),
            IndexModel::builder().keys(doc! { "shortCode": 1 }).build(),
        ];
        let result = self.urls.create_indexes(indexes).await?;
        info!("Ensured indexes on {}: {:?}", URLS_COLLECTION, result.index_names);
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for MongoLinkRepository {
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<Link>, AppError> {
        Ok(self.urls.find_one(doc! { "fullUrl": full_url }).await?)
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.urls.find_one(doc! { "shortCode": short_code }).await?)
    }

    async fn insert(&self, link: &Link) -> Result<(), AppError> {
        self.urls.insert_one(link).await?;
        Ok(())
    }

    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let result = self.urls.delete_one(doc! { "shortCode": short_code }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let cutoff = bson::DateTime::from_millis(now.timestamp_millis());
        let result = self
            .urls
            .delete_many(doc! { "expiryDate": { "$ne": null, "$lt": cutoff } })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
