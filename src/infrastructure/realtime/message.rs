//! WebSocket wire format.
//!
//! Every frame is a JSON object `{"event": <name>, "data": {...}}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::StatsSnapshot;
use crate::domain::events::NotificationEvent;
use crate::utils::short_url::build_short_url;

/// Frames sent from the server to observers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Welcome {
        message: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    ClickUpdate {
        short_code: String,
        clicks: i64,
        original_url: String,
        short_url: String,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    NewUrl {
        short_code: String,
        original_url: String,
        short_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    StatsUpdate {
        total_urls: i64,
        total_clicks: i64,
        connected_clients: usize,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Pong { timestamp: DateTime<Utc> },
    #[serde(rename_all = "camelCase")]
    Error { message: String },
}

impl ServerMessage {
    pub fn welcome() -> Self {
        Self::Welcome {
            message: "Connected to linkpulse real-time updates".to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn stats(snapshot: StatsSnapshot) -> Self {
        Self::StatsUpdate {
            total_urls: snapshot.total_urls,
            total_clicks: snapshot.total_clicks,
            connected_clients: snapshot.connected_observers,
            timestamp: Utc::now(),
        }
    }

    /// Builds the wire frame for a domain event.
    pub fn from_event(event: NotificationEvent, base_url: &str) -> Self {
        match event {
            NotificationEvent::NewUrl(m) => Self::NewUrl {
                short_url: build_short_url(base_url, &m.short_code),
                short_code: m.short_code,
                original_url: m.original_url,
                clicks: m.clicks,
                created_at: m.created_at,
                timestamp: Utc::now(),
            },
            NotificationEvent::ClickRecorded(m) => Self::ClickUpdate {
                short_url: build_short_url(base_url, &m.short_code),
                short_code: m.short_code,
                clicks: m.clicks,
                original_url: m.original_url,
                timestamp: Utc::now(),
            },
            NotificationEvent::StatsSnapshot(snapshot) => Self::stats(snapshot),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Frames accepted from observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientMessage {
    Ping,
    GetStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlMapping;
    use serde_json::Value;

    fn mapping() -> UrlMapping {
        UrlMapping::new(
            7,
            "https://example.com/a".to_string(),
            "xY3kP2".to_string(),
            3,
            Utc::now(),
            None,
        )
    }

    #[test]
    fn test_click_update_frame_shape() {
        let frame = ServerMessage::from_event(
            NotificationEvent::ClickRecorded(mapping()),
            "http://localhost:3000/",
        );
        let json: Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "clickUpdate");
        assert_eq!(json["data"]["shortCode"], "xY3kP2");
        assert_eq!(json["data"]["clicks"], 3);
        assert_eq!(json["data"]["originalUrl"], "https://example.com/a");
        assert_eq!(json["data"]["shortUrl"], "http://localhost:3000/xY3kP2");
        assert!(json["data"]["timestamp"].is_string());
    }

    #[test]
    fn test_new_url_frame_shape() {
        let frame =
            ServerMessage::from_event(NotificationEvent::NewUrl(mapping()), "https://s.test");
        let json: Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "newUrl");
        assert_eq!(json["data"]["shortUrl"], "https://s.test/xY3kP2");
        assert!(json["data"]["createdAt"].is_string());
    }

    #[test]
    fn test_stats_update_frame_shape() {
        let frame = ServerMessage::stats(StatsSnapshot {
            total_urls: 4,
            total_clicks: 10,
            connected_observers: 2,
        });
        let json: Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        assert_eq!(json["event"], "statsUpdate");
        assert_eq!(json["data"]["totalUrls"], 4);
        assert_eq!(json["data"]["totalClicks"], 10);
        assert_eq!(json["data"]["connectedClients"], 2);
    }

    #[test]
    fn test_client_message_parsing() {
        let ping: ClientMessage = serde_json::from_str(r#"{"event":"ping"}"#).unwrap();
        assert_eq!(ping, ClientMessage::Ping);

        let stats: ClientMessage = serde_json::from_str(r#"{"event":"getStats"}"#).unwrap();
        assert_eq!(stats, ClientMessage::GetStats);

        assert!(serde_json::from_str::<ClientMessage>(r#"{"event":"shutdown"}"#).is_err());
    }
}
