//! Redirect resolution, click counting and statistics reads.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::domain::entities::{StatsSnapshot, UrlMapping};
use crate::domain::events::{NotificationEvent, Notifier};
use crate::domain::repositories::UrlRepository;
use crate::domain::stats_broadcaster::collect_snapshot;
use crate::error::AppError;

/// Service backing the redirect and statistics endpoints.
pub struct RedirectService {
    repository: Arc<dyn UrlRepository>,
    notifier: Arc<dyn Notifier>,
}

impl RedirectService {
    pub fn new(repository: Arc<dyn UrlRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    /// Resolves `code` to its target and records one click.
    ///
    /// The counter is incremented atomically by the repository, so `K`
    /// concurrent redirects always raise the count by exactly `K`. Each
    /// successful redirect publishes a click event carrying the new count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes.
    ///
    /// Returns [`AppError::Expired`] when the mapping's expiry has passed;
    /// no click is recorded in that case.
    pub async fn resolve_and_record_click(&self, code: &str) -> Result<String, AppError> {
        let mapping = self
            .repository
            .find_by_short_code(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        if mapping.is_expired_at(Utc::now()) {
            debug!("Short code {} expired at {:?}", code, mapping.expires_at);
            return Err(AppError::expired(
                "Short URL has expired",
                json!({ "code": code, "expiresAt": mapping.expires_at }),
            ));
        }

        let updated = self
            .repository
            .increment_clicks(code)
            .await?
            .ok_or_else(|| not_found(code))?;

        metrics::counter!("clicks_recorded_total").increment(1);
        let target = updated.original_url.clone();
        self.notifier
            .publish(NotificationEvent::ClickRecorded(updated));

        Ok(target)
    }

    /// Returns the mapping for `code` without recording a click.
    ///
    /// Expired mappings are still returned; callers report expiry separately.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes.
    pub async fn get_stats(&self, code: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_short_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// Lists mappings newest first.
    ///
    /// `limit = None` returns everything from `offset` onward.
    pub async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list(offset, limit).await
    }

    /// Lists every mapping, newest first.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.list(0, None).await
    }

    /// Returns `(total_urls, total_clicks)`.
    pub async fn summary(&self) -> Result<(i64, i64), AppError> {
        tokio::try_join!(self.repository.count(), self.repository.sum_clicks())
    }

    /// Current aggregate totals plus connected observer count.
    pub async fn snapshot(&self) -> Result<StatsSnapshot, AppError> {
        collect_snapshot(self.repository.as_ref(), self.notifier.as_ref()).await
    }

    /// Number of currently connected real-time observers.
    pub fn observer_count(&self) -> usize {
        self.notifier.observer_count()
    }

    /// Checks that storage is reachable.
    pub async fn check_storage(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}
