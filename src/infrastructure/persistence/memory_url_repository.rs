//! Process-local implementation of the URL repository.
//!
//! Intended for development without a database and for tests. State is lost
//! on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::{AppError, UniqueKey};

#[derive(Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, UrlMapping>,
    code_by_url: HashMap<String, String>,
}

/// In-memory repository guarded by a single read-write lock.
///
/// Uniqueness checks and the insert happen under one write guard, as do
/// click increments, which gives the same atomicity as the database
/// constraints and `UPDATE ... RETURNING`.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    inner: RwLock<Inner>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .code_by_url
            .get(original_url)
            .and_then(|code| inner.by_code.get(code))
            .cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        Ok(self.inner.read().await.by_code.get(short_code).cloned())
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mut inner = self.inner.write().await;

        if inner.by_code.contains_key(&new_mapping.short_code) {
            return Err(AppError::conflict(UniqueKey::ShortCode));
        }
        if inner.code_by_url.contains_key(&new_mapping.original_url) {
            return Err(AppError::conflict(UniqueKey::OriginalUrl));
        }

        inner.next_id += 1;
        let mapping = UrlMapping::new(
            inner.next_id,
            new_mapping.original_url,
            new_mapping.short_code,
            0,
            new_mapping.created_at,
            new_mapping.expires_at,
        );

        inner
            .code_by_url
            .insert(mapping.original_url.clone(), mapping.short_code.clone());
        inner
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let mut inner = self.inner.write().await;

        Ok(inner.by_code.get_mut(short_code).map(|mapping| {
            mapping.clicks += 1;
            mapping.clone()
        }))
    }

    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<UrlMapping>, AppError> {
        let inner = self.inner.read().await;

        let mut mappings: Vec<UrlMapping> = inner.by_code.values().cloned().collect();
        mappings.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(mappings.into_iter().skip(offset).take(limit).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.inner.read().await.by_code.len() as i64)
    }

    async fn sum_clicks(&self) -> Result<i64, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .by_code
            .values()
            .map(|m| m.clicks)
            .sum())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
