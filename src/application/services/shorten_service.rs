//! URL shortening service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::events::{NotificationEvent, Notifier};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, UniqueKey};
use crate::utils::code_generator::{CodeGenerator, is_reserved};
use crate::utils::url_normalizer::normalize_url;

/// Default number of candidate codes tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Service for creating short codes.
///
/// Handles URL validation, deduplication by normalized URL, and collision
/// retry. Uniqueness is never decided here: the repository's atomic insert
/// reports conflicts and this service reacts to them.
pub struct ShortenService {
    repository: Arc<dyn UrlRepository>,
    generator: Arc<dyn CodeGenerator>,
    notifier: Arc<dyn Notifier>,
    max_attempts: usize,
}

impl ShortenService {
    /// Creates a new shortening service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        notifier: Arc<dyn Notifier>,
        max_attempts: usize,
    ) -> Self {
        Self {
            repository,
            generator,
            notifier,
            max_attempts,
        }
    }

    /// Returns the mapping for `original_url`, creating it on first request.
    ///
    /// # Deduplication
    ///
    /// If the normalized URL is already mapped, the existing mapping is
    /// returned unchanged and `expires_at` is ignored.
    ///
    /// # Concurrency
    ///
    /// Two concurrent calls for the same new URL race on the storage
    /// constraint. The loser receives a conflict on the original URL, re-reads
    /// and returns the winner's mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty, malformed or not
    /// http(s), or if `expires_at` is not in the future.
    ///
    /// Returns [`AppError::GenerationExhausted`] if every candidate collided.
    pub async fn shorten(
        &self,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlMapping, AppError> {
        let normalized_url = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        if let Some(existing) = self
            .repository
            .find_by_original_url(&normalized_url)
            .await?
        {
            debug!("URL already shortened as {}", existing.short_code);
            return Ok(existing);
        }

        let created_at = Utc::now();
        if let Some(expiry) = expires_at
            && expiry <= created_at
        {
            return Err(AppError::bad_request(
                "Expiry must be in the future",
                json!({ "expiresAt": expiry }),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate();

            if is_reserved(&code) {
                debug!("Candidate {} is reserved, retrying", code);
                continue;
            }

            let new_mapping = NewUrlMapping {
                original_url: normalized_url.clone(),
                short_code: code,
                created_at,
                expires_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => {
                    info!(
                        code = %mapping.short_code,
                        attempt,
                        "Created short URL for {}",
                        mapping.original_url
                    );
                    metrics::counter!("urls_created_total").increment(1);
                    self.notifier
                        .publish(NotificationEvent::NewUrl(mapping.clone()));
                    return Ok(mapping);
                }
                Err(AppError::Conflict {
                    key: UniqueKey::ShortCode,
                }) => {
                    metrics::counter!("code_collisions_total").increment(1);
                    debug!(attempt, "Short code collision, retrying");
                }
                Err(AppError::Conflict {
                    key: UniqueKey::OriginalUrl,
                }) => {
                    debug!("Concurrent shorten of the same URL won the race, re-reading");
                    return self
                        .repository
                        .find_by_original_url(&normalized_url)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal(
                                "Conflicting mapping disappeared",
                                json!({ "originalUrl": normalized_url }),
                            )
                        });
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            attempts = self.max_attempts,
            "Exhausted short code attempts for {}", normalized_url
        );
        Err(AppError::GenerationExhausted {
            attempts: self.max_attempts,
        })
    }
}
