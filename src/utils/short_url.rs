//! Public short URL construction.

/// Joins the configured public base URL and a short code.
///
/// Trailing slashes on `base_url` are ignored, so both
/// `http://localhost:3000` and `http://localhost:3000/` yield
/// `http://localhost:3000/{code}`.
pub fn build_short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}
