//! Aggregate statistics across all mappings.

/// Point-in-time totals published by the periodic stats broadcaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_urls: i64,
    pub total_clicks: i64,
    pub connected_observers: usize,
}
