//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Look up the code
/// 2. Refuse expired mappings
/// 3. Atomically increment the click counter
/// 4. Publish a `clickUpdate` to real-time observers (fire-and-forget)
/// 5. Return 302 Found
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the short URL has expired.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .redirect_service
        .resolve_and_record_click(&code)
        .await?;

    debug!("Redirecting {} -> {}", code, target);

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
