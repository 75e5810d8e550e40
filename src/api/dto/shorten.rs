//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;
use crate::utils::short_url::build_short_url;

/// Request to shorten a single URL.
///
/// `url` is optional at the serde level so a missing field surfaces as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[validate(
        required(message = "URL is required"),
        length(min = 1, max = 2048, message = "URL must be 1 to 2048 characters")
    )]
    pub url: Option<String>,

    /// Optional expiry. After this instant the short URL returns 410 Gone.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Created (or previously existing) short URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Set when an existing mapping was returned whose expiry has passed.
    pub expired: bool,
}

impl ShortenResponse {
    pub fn from_mapping(mapping: UrlMapping, base_url: &str, now: DateTime<Utc>) -> Self {
        Self {
            expired: mapping.is_expired_at(now),
            short_url: build_short_url(base_url, &mapping.short_code),
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            created_at: mapping.created_at,
            expires_at: mapping.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accepts_camel_case_expiry() {
        let req: ShortenRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "expiresAt": "2030-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert!(req.expires_at.is_some());
    }

    #[test]
    fn test_missing_url_fails_validation() {
        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_url_fails_validation() {
        let req: ShortenRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_overlong_url_fails_validation() {
        let url = format!("https://example.com/{}", "a".repeat(2048));
        let req = ShortenRequest {
            url: Some(url),
            expires_at: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_response_omits_missing_expiry() {
        let mapping = UrlMapping::new(
            1,
            "https://example.com/a".to_string(),
            "abc123".to_string(),
            0,
            Utc::now(),
            None,
        );
        let json =
            serde_json::to_value(ShortenResponse::from_mapping(
            mapping,
            "http://localhost:3000",
            Utc::now(),
        ))
        .unwrap();

        assert_eq!(json["shortUrl"], "http://localhost:3000/abc123");
        assert_eq!(json["originalUrl"], "https://example.com/a");
        assert!(json.get("expiresAt").is_none());
        assert_eq!(json["expired"], false);
    }

    #[test]
    fn test_response_flags_expired_mapping() {
        let created_at = Utc::now() - chrono::Duration::hours(2);
        let mapping = UrlMapping::new(
            1,
            "https://example.com/a".to_string(),
            "abc123".to_string(),
            0,
            created_at,
            Some(created_at + chrono::Duration::hours(1)),
        );
        let response = ShortenResponse::from_mapping(mapping, "http://localhost:3000", Utc::now());

        assert!(response.expired);
    }
}
