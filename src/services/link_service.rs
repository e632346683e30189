use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{debug, info};

use crate::errors::app_error::{AppError, FULL_URL_REQUIRED};
use crate::models::link::Link;
use crate::repository::link_repository::LinkRepository;
use crate::utils::qr_code::render_data_url;
use crate::utils::short_code::generate_short_code;

/// Shorten and resolve on top of a [`LinkRepository`].
///
/// Dedup is a plain lookup followed by an insert. Two concurrent shortens of
/// the same new URL may both miss the lookup and store two links.
#[derive(Clone)]
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into(),
        }
    }

    pub fn repository(&self) -> &Arc<dyn LinkRepository> {
        &self.repository
    }

    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// Return the link already stored for `full_url`, or create one.
    ///
    /// An existing link comes back as stored: a new `expiry_seconds` does not
    /// refresh its expiry and its QR code is not re-rendered.
    pub async fn shorten(
        &self,
        full_url: Option<&str>,
        expiry_seconds: Option<f64>,
    ) -> Result<Link, AppError> {
        let full_url = match full_url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(AppError::validation(FULL_URL_REQUIRED)),
        };

        if let Some(existing) = self.repository.find_by_full_url(full_url).await? {
            debug!("Reusing short code {} for {}", existing.short_code, full_url);
            return Ok(existing);
        }

        let short_code = generate_short_code();
        let expiry_date = expiry_from_now(Utc::now(), expiry_seconds)?;
        let qr_code = render_data_url(&self.short_url(&short_code))?;

        let link = Link::new(full_url.to_string(), short_code, expiry_date, qr_code);
        self.repository.insert(&link).await?;
        info!("Created short code {} for {}", link.short_code, link.full_url);

        Ok(link)
    }

    /// Redirect target for `short_code`. An expired link is deleted before
    /// [`AppError::Expired`] is returned, so the next resolve sees `NotFound`.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let link = self
            .repository
            .find_by_short_code(short_code)
            .await?
            .ok_or(AppError::NotFound)?;

        if link.is_expired_at(Utc::now()) {
            self.repository.delete_by_short_code(short_code).await?;
            info!("Deleted expired short code {}", short_code);
            return Err(AppError::Expired);
        }

        Ok(link.redirect_target())
    }
}

/// Absent, zero, negative or non-finite seconds mean "never expires".
fn expiry_from_now(
    now: DateTime<Utc>,
    expiry_seconds: Option<f64>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    let Some(seconds) = expiry_seconds.filter(|s| s.is_finite() && *s > 0.0) else {
        return Ok(None);
    };

    Duration::try_milliseconds((seconds * 1000.0) as i64)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .map(Some)
        .ok_or_else(|| AppError::validation("Expiry time is out of range"))
}
