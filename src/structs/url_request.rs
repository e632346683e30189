use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::errors::app_error::FULL_URL_REQUIRED;
use crate::models::link::Link;

#[derive(Deserialize, Validate, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(
        required(message = "Full URL is required"),
        length(min = 1, message = "Full URL is required")
    )]
    pub full_url: Option<String>,
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub expiry_time: Option<f64>, // seconds from now
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// `60` and `"60"` both count. Text that is not a number counts as absent.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        Some(NumberOrString::Number(n)) => Some(n),
        Some(NumberOrString::Text(text)) => text.trim().parse::<f64>().ok(),
        None => None,
    })
}

impl ShortenRequest {
    pub fn check(&self) -> Result<(), &'static str> {
        self.validate().map_err(|_| FULL_URL_REQUIRED)
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub full_url: String,
    pub short_code: String,
    pub short_url: String,
    #[serde(serialize_with = "millis_timestamp")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub qr_code: String,
}

/// Always three fractional digits, e.g. `2024-01-01T00:00:00.000Z`.
fn millis_timestamp<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}

impl ShortenResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            expiry_date: link.expires_at(),
            full_url: link.full_url,
            short_code: link.short_code,
            short_url,
            qr_code: link.qr_code,
        }
    }
}
