//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::short_link::ShortLink;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_normalizer::normalize_url;

/// Creates a short link for a destination URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "custom_key": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "key": "a1b2c3",
///   "short_url": "https://s.example.com/a1b2c3",
///   "qr_url": "https://s.example.com/a1b2c3/qr"
/// }
/// ```
///
/// # Behavior
///
/// The URL is normalized before storage. Without a custom key a random key
/// is allocated with collision retry; with one, a single existence check is
/// performed and an occupied key is a conflict, never silently replaced.
///
/// # Errors
///
/// - 400 Bad Request - invalid URL or custom key
/// - 409 Conflict - custom key already in use
/// - 429 Too Many Requests - rate limit exceeded (enforced by middleware)
/// - 500 Internal Server Error - store failure or allocation exhaustion
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let target = normalize_url(&payload.url)?;

    let key = match payload.custom_key {
        Some(custom) => {
            state.allocator.claim(&custom, &target).await?;
            custom
        }
        None => state.allocator.allocate(&target).await?,
    };

    let link = ShortLink::new(key, target);
    let short_url = link.short_url(&state.base_url);
    let qr_url = format!("{}/qr", short_url);

    Ok(Json(ShortenResponse {
        key: link.key,
        short_url,
        qr_url,
    }))
}
