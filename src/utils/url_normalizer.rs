//! URL normalization and sanitization.
//!
//! Destination URLs are normalized before storage so equivalent inputs map to
//! the same stored value and dangerous schemes never reach a redirect.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("Failed to normalize URL: {0}")]
    NormalizationFailed(String),
}

/// Normalizes a destination URL to a canonical form.
///
/// Rules: scheme must be `http` or `https` (rejects `javascript:`, `data:`,
/// `file:` and friends), hostname is lowercased, default ports (80/443) and
/// fragments are stripped, path and query are preserved as-is.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed input and
/// [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url =
        Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    }

    if let Some(host) = url.host_str() {
        let lowered = host.to_ascii_lowercase();
        url.set_host(Some(&lowered)).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("could not set normalized host".to_string())
        })?;
    }

    url.set_fragment(None);

    let default_port = matches!(
        (url.scheme(), url.port()),
        ("http", Some(80)) | ("https", Some(443))
    );
    if default_port {
        url.set_port(None).map_err(|_| {
            UrlNormalizationError::NormalizationFailed("could not strip default port".to_string())
        })?;
    }

    Ok(url.to_string())
}
