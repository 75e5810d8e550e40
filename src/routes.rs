//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}` - Short link redirect
//! - `GET  /ws`     - Real-time WebSocket observers
//! - `/api/*`       - REST API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api/*` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{redirect_handler, websocket_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};

/// Constructs the production router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = if behind_proxy {
        api::routes::api_routes().layer(rate_limit::layer(SmartIpKeyExtractor))
    } else {
        api::routes::api_routes().layer(rate_limit::layer(PeerIpKeyExtractor))
    };

    NormalizePathLayer::trim_trailing_slash().layer(compose(state, api_router))
}

/// Same routes as [`app_router`] without rate limiting or path normalization.
///
/// Does not require connection info, so it can be driven by in-process test
/// servers.
pub fn router(state: AppState) -> Router {
    compose(state, api::routes::api_routes())
}

fn compose(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
