//! Per-client rate limiting using a token bucket.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::KeyExtractor,
};

/// Sustained requests per second per client.
pub const REQUESTS_PER_SECOND: u64 = 10;

/// Requests a client may burst before being throttled.
pub const BURST_SIZE: u32 = 100;

/// Creates a rate limiter keyed by `key_extractor`.
///
/// # Limits
///
/// - **Rate**: 10 requests per second
/// - **Burst**: 100 requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Pass `PeerIpKeyExtractor` to key on the socket peer address, or
/// `SmartIpKeyExtractor` to honour `X-Forwarded-For` / `X-Real-IP` when the
/// service sits behind a trusted reverse proxy. Peer-address keys require
/// the server to be started with `into_make_service_with_connect_info`.
///
/// # Example
///
/// ```rust,ignore
/// let api = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::layer(PeerIpKeyExtractor));
/// ```
pub fn layer<K>(key_extractor: K) -> GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>
where
    K: KeyExtractor,
{
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(REQUESTS_PER_SECOND)
            .burst_size(BURST_SIZE)
            .finish()
            .expect("rate limit constants are non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
