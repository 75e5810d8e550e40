//! Handler for link shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use chrono::Utc;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL, or returns the existing one for a known URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/a",
///   "expiresAt": "2030-01-01T00:00:00Z"  // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com/a",
///   "shortUrl": "http://localhost:3000/xY3kP2",
///   "shortCode": "xY3kP2",
///   "createdAt": "2026-10-18T12:00:00Z",
///   "expired": false
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a malformed body, a missing or invalid URL,
/// or an expiry that is not in the future.
/// Returns 503 Service Unavailable if no free code could be found.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let url = payload.url.unwrap_or_default();
    let mapping = state
        .shorten_service
        .shorten(&url, payload.expires_at)
        .await?;

    Ok(Json(ShortenResponse::from_mapping(
        mapping,
        state.base_url(),
        Utc::now(),
    )))
}
