//! Application layer services implementing business logic.
//!
//! Services consume the domain's repository and notifier traits and expose
//! the operations HTTP handlers and the admin CLI call.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Short code creation with deduplication
//! - [`services::RedirectService`] - Redirects, click counting and statistics

pub mod services;
