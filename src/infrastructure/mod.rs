//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`realtime`] - Notification fan-out to WebSocket observers

pub mod persistence;
pub mod realtime;
