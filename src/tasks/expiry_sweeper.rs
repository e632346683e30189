use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info};
use tokio::task::JoinHandle;

use crate::repository::link_repository::LinkRepository;

/// Periodically delete expired links that nobody resolved.
pub fn spawn_expiry_sweeper(
    repository: Arc<dyn LinkRepository>,
    interval: Duration,
) -> JoinHandle<()> {
    info!("Expiry sweep enabled every {:?}", interval);

    actix_web::rt::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            sweep_once(repository.as_ref()).await;
        }
    })
}

pub async fn sweep_once(repository: &dyn LinkRepository) -> u64 {
    match repository.delete_expired(Utc::now()).await {
        Ok(0) => {
            debug!("Expiry sweep found nothing to delete");
            0
        }
        Ok(deleted) => {
            info!("Expiry sweep deleted {} links", deleted);
            deleted
        }
        Err(e) => {
            error!("Expiry sweep failed: {}", e);
            0
        }
    }
}
