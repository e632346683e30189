use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::app_error::AppError;
use crate::models::link::Link;
use crate::repository::link_repository::LinkRepository;

/// Vec-backed store for tests. Like the Mongo collection it enforces no
/// uniqueness, and lookups return the first match in insertion order.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: RwLock<Vec<Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.links.read().await.len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.read().await;
        Ok(links.iter().find(|l| l.full_url == full_url).cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.read().await;
        Ok(links.iter().find(|l| l.short_code == short_code).cloned())
    }

    async fn insert(&self, link: &Link) -> Result<(), AppError> {
        self.links.write().await.push(link.clone());
        Ok(())
    }

    async fn delete_by_short_code(&self, short_code: &str) -> Result<bool, AppError> {
        let mut links = self.links.write().await;
        match links.iter().position(|l| l.short_code == short_code) {
            Some(index) => {
                links.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let mut links = self.links.write().await;
        let before = links.len();
        links.retain(|l| !l.is_expired_at(now));
        Ok((before - links.len()) as u64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(full_url: &str, code: &str, expiry: Option<DateTime<Utc>>) -> Link {
        Link::new(full_url.into(), code.into(), expiry, String::new())
    }

    #[actix_web::test]
    async fn finds_by_either_key() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(&link("https://example.com", "abc", None))
            .await
            .unwrap();

        let by_url = repo.find_by_full_url("https://example.com").await.unwrap();
        let by_code = repo.find_by_short_code("abc").await.unwrap();
        assert_eq!(by_url, by_code);
        assert!(repo.find_by_short_code("nope").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn delete_is_idempotent() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(&link("https://example.com", "abc", None))
            .await
            .unwrap();

        assert!(repo.delete_by_short_code("abc").await.unwrap());
        assert!(!repo.delete_by_short_code("abc").await.unwrap());
        assert_eq!(repo.count().await, 0);
    }

    #[actix_web::test]
    async fn delete_expired_keeps_live_links() {
        let repo = InMemoryLinkRepository::new();
        let now = Utc::now();
        repo.insert(&link("a.com", "a", Some(now - Duration::seconds(5))))
            .await
            .unwrap();
        repo.insert(&link("b.com", "b", Some(now + Duration::seconds(5))))
            .await
            .unwrap();
        repo.insert(&link("c.com", "c", None)).await.unwrap();

        assert_eq!(repo.delete_expired(now).await.unwrap(), 1);
        assert!(repo.find_by_short_code("a").await.unwrap().is_none());
        assert_eq!(repo.count().await, 2);
    }
}
