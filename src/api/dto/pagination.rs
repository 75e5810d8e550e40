//! Offset/limit query parameters for the URL listing.

use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

/// Largest page a single request may ask for.
pub const MAX_LIMIT: i64 = 1000;

/// Listing query parameters.
///
/// Uses `serde_with` to parse integers from query strings.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub offset: Option<i64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<i64>,
}

impl ListParams {
    /// Validates parameters and converts them to repository arguments.
    ///
    /// # Defaults
    ///
    /// - `offset`: 0
    /// - `limit`: none (everything from `offset` onward)
    ///
    /// # Validation
    ///
    /// - Offset must be >= 0
    /// - Limit, when given, must be between 1 and 1000
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, Option<i64>), String> {
        let offset = self.offset.unwrap_or(0);
        if offset < 0 {
            return Err("Offset must not be negative".to_string());
        }

        if let Some(limit) = self.limit
            && !(1..=MAX_LIMIT).contains(&limit)
        {
            return Err(format!("Limit must be between 1 and {MAX_LIMIT}"));
        }

        Ok((offset, self.limit))
    }
}
