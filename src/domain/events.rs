//! Notification events and the publishing interface consumed by the core.
//!
//! Services publish through [`Notifier`] and never wait on delivery. The
//! concrete fan-out lives in [`crate::infrastructure::realtime`].

use crate::domain::entities::{StatsSnapshot, UrlMapping};

/// An event emitted by the core for real-time observers.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// A mapping was created for a previously unseen URL.
    NewUrl(UrlMapping),
    /// A redirect was recorded; carries the mapping after the increment.
    ClickRecorded(UrlMapping),
    /// Periodic aggregate totals.
    StatsSnapshot(StatsSnapshot),
}

impl NotificationEvent {
    /// Short name used in logs and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NewUrl(_) => "new_url",
            Self::ClickRecorded(_) => "click_recorded",
            Self::StatsSnapshot(_) => "stats_snapshot",
        }
    }
}

/// Fire-and-forget event sink.
///
/// `publish` must not block and must not fail the caller: implementations
/// log delivery problems and return.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Publishes an event to every connected observer.
    fn publish(&self, event: NotificationEvent);

    /// Number of observers currently connected.
    fn observer_count(&self) -> usize;
}
