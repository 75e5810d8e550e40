//! Validation and normalization of URLs submitted for shortening.
//!
//! This is the only URL validator in the crate. Deduplication compares
//! normalized strings, so two spellings of the same address share a code.

use url::Url;

/// Reasons a submitted URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Validates `input` as an absolute http(s) URL and returns its canonical form.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace is trimmed; an empty result is rejected
/// 2. Only `http` and `https` schemes are accepted
/// 3. Scheme and host are lower-cased
/// 4. Default ports (80 for HTTP, 443 for HTTPS) are removed
/// 5. Path, query and fragment are preserved as-is
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("  HTTPS://EXAMPLE.COM:443/a#top ").unwrap(),
///     "https://example.com/a#top"
/// );
/// assert!(normalize_url("not a url").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let mut url =
        Url::parse(trimmed).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();

    url.set_host(Some(&host)).map_err(|_| {
        UrlNormalizationError::NormalizationFailed("Failed to set normalized host".to_string())
    })?;

    let is_default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if is_default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("Failed to remove default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
