//! API route configuration.

use crate::api::handlers::{
    health_handler, shorten_handler, stats_handler, url_list_handler, websocket_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All routes served under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`          - Create (or fetch) the short URL for a long URL
/// - `GET  /stats/websocket`  - Connected real-time observer count
/// - `GET  /stats/{code}`     - Click statistics for one short URL
/// - `GET  /urls`             - All short URLs, newest first (offset/limit)
/// - `GET  /health`           - Storage health check
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats/websocket", get(websocket_stats_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/urls", get(url_list_handler))
        .route("/health", get(health_handler))
}
