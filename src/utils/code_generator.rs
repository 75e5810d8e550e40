//! Short code generation.
//!
//! Codes are drawn from the 62-character alphanumeric alphabet. With the
//! default length of 6 there are 62^6 (about 5.6 × 10^10) possible codes.
//! The generator gives no uniqueness guarantee; the storage layer's unique
//! index and the shortening service's retry loop do.

use rand::{Rng, distr::Alphanumeric};

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Codes that would shadow a top-level route and can never be handed out.
const RESERVED_CODES: &[&str] = &["api", "ws", "health", "static", "admin", "dashboard"];

/// Produces candidate short codes.
///
/// Implementations must be callable concurrently without shared mutable state.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random alphanumeric code generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

/// Returns true if `code` collides with a reserved route segment.
///
/// Comparison is case-insensitive so that `API` or `Ws` are rejected too.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(code))
}
