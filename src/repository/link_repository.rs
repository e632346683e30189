use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::app_error::AppError;
use crate::models::link::Link;

/// Read/write contract of the link store.
///
/// No method is transactional. Callers that read and then write (dedup on
/// shorten, delete-on-expiry on resolve) can race with each other.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<Link>, AppError>;

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    async fn insert(&self, link: &Link) -> Result<(), AppError>;

    /// Returns `false` when nothing matched. Deleting twice is not an error.
    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError>;

    /// Remove every link whose expiry date lies before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
