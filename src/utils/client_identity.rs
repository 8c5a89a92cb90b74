//! Rate-limit identity derivation from HTTP request headers.

use axum::http::HeaderMap;

/// Identity used when no client-address header is present.
///
/// All unidentifiable clients share one rate bucket. This is a deliberate
/// shared-fate design choice, not a bug: without a trusted address there is
/// nothing better to key on.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Derives the rate-limit identity for a request.
///
/// Reads `X-Forwarded-For` (first entry) or `X-Real-IP`, set by a trusted
/// reverse proxy in front of the service. Falls back to
/// [`UNKNOWN_IDENTITY`] when neither header carries a usable value.
pub fn client_identity(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
        && let Some(first) = value.split(',').next()
    {
        let ip = first.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
    {
        let ip = value.trim();
        if !ip.is_empty() {
            return ip.to_string();
        }
    }

    UNKNOWN_IDENTITY.to_string()
}
