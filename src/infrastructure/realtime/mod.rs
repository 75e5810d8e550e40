//! Real-time notification fan-out.
//!
//! - [`BroadcastHub`] - `Notifier` backed by a tokio broadcast channel
//! - [`NullNotifier`] - `Notifier` that discards events
//! - [`message`] - JSON frames exchanged with WebSocket observers

pub mod hub;
pub mod message;

pub use hub::{BroadcastHub, DEFAULT_EVENT_BUFFER, NullNotifier};
pub use message::{ClientMessage, ServerMessage};
