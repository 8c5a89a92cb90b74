//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /api/shorten`.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL to shorten.
    #[validate(length(min = 1, max = 2048))]
    pub url: String,

    /// Optional caller-chosen short key (`[0-9a-z-]+`).
    #[validate(length(min = 1, max = 64))]
    pub custom_key: Option<String>,
}

/// Response body for `POST /api/shorten`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    /// Allocated or claimed short key.
    pub key: String,
    /// Full public short URL.
    pub short_url: String,
    /// URL of the rendered QR code for the short URL.
    pub qr_url: String,
}
