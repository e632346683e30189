use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};

/// Bytes escaped in a `Location` header. Non-ASCII is always escaped; `%` is
/// kept so already-encoded sequences pass through unchanged.
const LOCATION_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A stored full URL to short code mapping.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub full_url: String,
    pub short_code: String,
    #[serde(default)]
    pub expiry_date: Option<bson::DateTime>, // null means the link never expires
    #[serde(default)]
    pub qr_code: String, // data:image/png;base64,... of the short URL
}

impl Link {
    pub fn new(
        full_url: String,
        short_code: String,
        expiry_date: Option<DateTime<Utc>>,
        qr_code: String,
    ) -> Self {
        Self {
            id: None,
            full_url,
            short_code,
            expiry_date: expiry_date.map(|at| bson::DateTime::from_millis(at.timestamp_millis())),
            qr_code,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
            .and_then(|at| DateTime::from_timestamp_millis(at.timestamp_millis()))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expiry_date {
            Some(expiry) => now.timestamp_millis() > expiry.timestamp_millis(),
            None => false,
        }
    }

    /// Where a resolve should send the client, percent-encoded for use as a
    /// header value. Scheme-less URLs get `https://`; the stored value is left
    /// untouched.
    pub fn redirect_target(&self) -> String {
        let has_scheme =
            self.full_url.starts_with("http://") || self.full_url.starts_with("https://");
        let target = if has_scheme {
            self.full_url.clone()
        } else {
            format!("https://{}", self.full_url)
        };
        utf8_percent_encode(&target, LOCATION_ENCODE_SET).to_string()
    }
}
