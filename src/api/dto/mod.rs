//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs serialize with camelCase field names. Request DTOs use
//! `validator` for input validation.

pub mod health;
pub mod pagination;
pub mod realtime;
pub mod shorten;
pub mod stats;
