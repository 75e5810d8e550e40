//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. It defines what the service stores and what it announces; the
//! infrastructure layer decides how.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage trait definitions
//! - [`events`] - Notification events and the [`events::Notifier`] interface
//! - [`stats_broadcaster`] - Periodic aggregate snapshot publisher
//!
//! # Redirect Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::RedirectService`] resolves the code
//! 3. The click is counted via [`repositories::UrlRepository::increment_clicks`]
//! 4. A [`events::NotificationEvent::ClickRecorded`] is published, fire-and-forget

pub mod entities;
pub mod events;
pub mod repositories;
pub mod stats_broadcaster;
