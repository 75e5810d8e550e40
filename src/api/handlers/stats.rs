//! Handler for per-URL statistics.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::api::dto::stats::UrlStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for a short code without recording a click.
///
/// # Endpoint
///
/// `GET /api/stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a",
///   "shortUrl": "http://localhost:3000/xY3kP2",
///   "shortCode": "xY3kP2",
///   "clicks": 42,
///   "createdAt": "2026-10-18T12:00:00Z",
///   "expired": false
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let mapping = state.redirect_service.get_stats(&code).await?;

    Ok(Json(UrlStatsResponse::from_mapping(
        mapping,
        state.base_url(),
        Utc::now(),
    )))
}
