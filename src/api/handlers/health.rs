//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::events::Notifier;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /api/health`
///
/// # Response Codes
///
/// - **200 OK**: Storage reachable
/// - **503 Service Unavailable**: Storage unreachable
///
/// # Components Checked
///
/// 1. **Storage**: Round-trip ping to the URL store
/// 2. **Realtime**: Number of connected observers (informational)
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "timestamp": "2026-10-18T12:00:00Z",
///   "version": "0.1.0",
///   "checks": {
///     "storage": { "status": "ok", "message": "Connected" },
///     "realtime": { "status": "ok", "message": "2 observer(s) connected" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let realtime = CheckStatus::ok(format!(
        "{} observer(s) connected",
        state.hub.observer_count()
    ));

    let healthy = storage.is_ok();

    let response = HealthResponse {
        status: if healthy { "OK" } else { "DEGRADED" }.to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { storage, realtime },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.redirect_service.check_storage().await {
        Ok(()) => CheckStatus::ok("Connected"),
        Err(e) => CheckStatus::error(format!("Storage error: {}", e)),
    }
}
