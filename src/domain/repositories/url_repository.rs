//! Repository trait for URL mapping storage.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage contract for URL mappings.
///
/// This is the only shared mutable resource of the service. Every mutation
/// goes through [`insert`](UrlRepository::insert) or
/// [`increment_clicks`](UrlRepository::increment_clicks), both of which are
/// atomic with respect to concurrent callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUrlRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Finds a mapping by its (normalized) original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlMapping>, AppError>;

    /// Finds a mapping by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Inserts a new mapping with zero clicks.
    ///
    /// Uniqueness of both `short_code` and `original_url` is enforced by the
    /// storage layer in the same step as the write.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with the violated [`crate::error::UniqueKey`].
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Atomically adds one click and returns the updated mapping.
    ///
    /// Returns `Ok(None)` if no mapping has this code. N concurrent calls on
    /// the same code add exactly N.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Lists mappings newest first.
    ///
    /// `limit = None` returns every mapping after `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<UrlMapping>, AppError>;

    /// Counts all mappings.
    async fn count(&self) -> Result<i64, AppError>;

    /// Sums clicks across all mappings.
    async fn sum_clicks(&self) -> Result<i64, AppError>;

    /// Checks that the storage backend is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
