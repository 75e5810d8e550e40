//! Broadcast hub fanning notification events out to WebSocket observers.

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::domain::events::{NotificationEvent, Notifier};

use super::message::ServerMessage;

/// Default number of frames buffered per observer before it starts lagging.
pub const DEFAULT_EVENT_BUFFER: usize = 1024;

/// Fan-out point for real-time observers.
///
/// Each event is serialized once and pushed into a `tokio::sync::broadcast`
/// channel; every WebSocket connection owns one receiver. Publishing never
/// waits: slow observers lag and skip frames instead of applying
/// backpressure to request handlers.
pub struct BroadcastHub {
    sender: broadcast::Sender<String>,
    base_url: String,
}

impl BroadcastHub {
    pub fn new(base_url: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            base_url: base_url.into(),
        }
    }

    /// Registers a new observer. Dropping the receiver unregisters it.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Public base URL used to render `shortUrl` fields.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Serializes and broadcasts a frame to all observers.
    pub fn broadcast(&self, message: &ServerMessage) {
        let frame = match message.to_json() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Failed to serialize real-time frame: {}", e);
                return;
            }
        };

        match self.sender.send(frame) {
            Ok(delivered) => debug!("Broadcast frame to {} observer(s)", delivered),
            Err(_) => debug!("No observers connected, frame dropped"),
        }
    }
}

impl Notifier for BroadcastHub {
    fn publish(&self, event: NotificationEvent) {
        metrics::counter!("notifications_published_total", "kind" => event.kind()).increment(1);
        self.broadcast(&ServerMessage::from_event(event, &self.base_url));
    }

    fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Notifier that discards every event.
///
/// Used where real-time delivery is not wanted, such as the admin CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn publish(&self, event: NotificationEvent) {
        debug!("Discarding {} event (notifications disabled)", event.kind());
    }

    fn observer_count(&self) -> usize {
        0
    }
}
