//! Handler for listing all short URLs.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::Utc;
use serde_json::json;

use crate::api::dto::pagination::ListParams;
use crate::api::dto::stats::UrlStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists short URLs with their statistics, newest first.
///
/// # Endpoint
///
/// `GET /api/urls?offset=0&limit=50`
///
/// Both parameters are optional. Without `limit` every mapping from
/// `offset` onward is returned.
///
/// # Errors
///
/// Returns 400 Bad Request for unparsable or out-of-range parameters.
pub async fn url_list_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<UrlStatsResponse>>, AppError> {
    let Query(params) = params.map_err(|e| {
        AppError::bad_request("Invalid query parameters", json!({ "reason": e.body_text() }))
    })?;

    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|reason| AppError::bad_request(reason, json!({})))?;

    let now = Utc::now();
    let items = state
        .redirect_service
        .list(offset, limit)
        .await?
        .into_iter()
        .map(|mapping| UrlStatsResponse::from_mapping(mapping, state.base_url(), now))
        .collect();

    Ok(Json(items))
}
