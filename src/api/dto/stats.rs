//! DTOs for per-URL statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::UrlMapping;
use crate::utils::short_url::build_short_url;

/// Statistics for a single short URL. Also used as the list item type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    pub expired: bool,
}

impl UrlStatsResponse {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            expired: mapping.is_expired_at(now),
            short_url: build_short_url(base_url, &mapping.short_code),
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            clicks: mapping.clicks,
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
        }
    }
}
