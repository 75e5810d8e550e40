//! Business logic services for the application layer.

pub mod redirect_service;
pub mod shorten_service;

pub use redirect_service::RedirectService;
pub use shorten_service::{DEFAULT_MAX_ATTEMPTS, ShortenService};
