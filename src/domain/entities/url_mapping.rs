//! URL mapping entity: a short code bound to its original URL.

use chrono::{DateTime, Utc};

/// A stored mapping between an original URL and its short code.
///
/// Only `clicks` changes after creation, and only through the repository's
/// atomic increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            clicks,
            created_at,
            expires_at,
        }
    }

    /// Returns true if the mapping has an expiry at or before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now >= e)
    }
}

/// Input data for inserting a new mapping.
///
/// `created_at` is chosen by the caller so that the `expires_at > created_at`
/// rule can be checked before the write.
#[derive(Debug, Clone)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn mapping(expires_at: Option<DateTime<Utc>>) -> UrlMapping {
        UrlMapping::new(
            1,
            "https://example.com/a".to_string(),
            "xY3kP2".to_string(),
            0,
            Utc::now(),
            expires_at,
        )
    }

    #[test]
    fn test_mapping_without_expiry_never_expires() {
        let m = mapping(None);
        assert!(!m.is_expired_at(Utc::now()));
        assert!(!m.is_expired_at(Utc::now() + Duration::days(3650)));
    }

    #[test]
    fn test_mapping_expired_in_the_past() {
        let m = mapping(Some(Utc::now() - Duration::seconds(1)));
        assert!(m.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_mapping_expiry_boundary_is_inclusive() {
        let at = Utc::now() + Duration::hours(1);
        let m = mapping(Some(at));

        assert!(!m.is_expired_at(at - Duration::milliseconds(1)));
        assert!(m.is_expired_at(at));
    }
}
