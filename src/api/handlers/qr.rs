//! Handler for the QR code image endpoint.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use serde_json::json;
use tracing::error;

use crate::domain::short_link::ShortLink;
use crate::error::AppError;
use crate::state::AppState;

/// A short link's content never changes once its key is assigned, so the
/// rendered image can be cached indefinitely.
const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Renders the QR code for a short link as an SVG document.
///
/// # Endpoint
///
/// `GET /{key}/qr`
///
/// The QR payload is the full short URL; the caption is the same URL with
/// its scheme prefix stripped for legibility.
///
/// # Errors
///
/// Returns 404 Not Found if the short key does not exist, and 500 if the
/// payload cannot be encoded (logged, not retried).
pub async fn qr_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .store
        .get(&key)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "key": key })))?;

    // The QR encodes the short URL itself, not the target
    let link = ShortLink::new(key, target);
    let short_url = link.short_url(&state.base_url);
    let caption = strip_scheme(&short_url);

    let image = state.renderer.render(&short_url, caption).map_err(|e| {
        error!(key = %link.key, error = %e, "QR rendering failed");
        e
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        image.to_svg(),
    ))
}

/// Strips the URL scheme prefix for use as a caption.
fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scheme() {
        assert_eq!(strip_scheme("https://s.example.com/a1"), "s.example.com/a1");
        assert_eq!(strip_scheme("http://s.example.com/a1"), "s.example.com/a1");
        assert_eq!(strip_scheme("s.example.com/a1"), "s.example.com/a1");
    }
}
