//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

const MAPPING_COLUMNS: &str = "id, original_url, short_code, clicks, created_at, expires_at";

#[derive(sqlx::FromRow)]
struct UrlMappingRow {
    id: i64,
    original_url: String,
    short_code: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl From<UrlMappingRow> for UrlMapping {
    fn from(r: UrlMappingRow) -> Self {
        UrlMapping::new(
            r.id,
            r.original_url,
            r.short_code,
            r.clicks,
            r.created_at,
            r.expires_at,
        )
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Uniqueness is enforced by the `url_mappings_short_code_key` and
/// `url_mappings_original_url_key` constraints; violations surface as
/// [`AppError::Conflict`] through `From<sqlx::Error>`. Click increments are a
/// single `UPDATE ... RETURNING` statement, so row locking serializes
/// concurrent increments on the same code.
///
/// Queries are checked at runtime (`query_as` over `UrlMappingRow`) rather
/// than with `sqlx::query!`, so the crate builds without a live database or
/// an offline `.sqlx` cache; the in-memory backend needs neither.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings WHERE original_url = $1"
        ))
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            "SELECT {MAPPING_COLUMNS} FROM url_mappings WHERE short_code = $1"
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            r#"
            INSERT INTO url_mappings (original_url, short_code, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING {MAPPING_COLUMNS}
            "#
        ))
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_code)
        .bind(new_mapping.created_at)
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let row = sqlx::query_as::<_, UrlMappingRow>(&format!(
            r#"
            UPDATE url_mappings
            SET clicks = clicks + 1
            WHERE short_code = $1
            RETURNING {MAPPING_COLUMNS}
            "#
        ))
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn list(&self, offset: i64, limit: Option<i64>) -> Result<Vec<UrlMapping>, AppError> {
        // LIMIT NULL means no limit in PostgreSQL.
        let rows = sqlx::query_as::<_, UrlMappingRow>(&format!(
            r#"
            SELECT {MAPPING_COLUMNS}
            FROM url_mappings
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn sum_clicks(&self) -> Result<i64, AppError> {
        let total: i64 =
            sqlx::query_scalar("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM url_mappings")
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(total)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
