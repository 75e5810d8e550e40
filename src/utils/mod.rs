//! Helpers for code generation and URL handling.
//!
//! - [`code_generator`] - Random short code generation and reserved words
//! - [`url_normalizer`] - URL validation and normalization
//! - [`short_url`] - Public short URL construction

pub mod code_generator;
pub mod short_url;
pub mod url_normalizer;
