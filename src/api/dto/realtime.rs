//! DTOs for real-time connection status.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSocketStatsResponse {
    pub connected_clients: usize,
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
