//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short code to original URL mapping
//! - [`NewUrlMapping`] - Input for inserting a mapping
//! - [`StatsSnapshot`] - Aggregate totals broadcast to observers

pub mod stats_snapshot;
pub mod url_mapping;

pub use stats_snapshot::StatsSnapshot;
pub use url_mapping::{NewUrlMapping, UrlMapping};
