//! API route configuration.

use axum::{Router, routing::post};

use crate::api::handlers::shorten_handler;
use crate::state::AppState;

/// Mutating API routes, guarded by the rate-limit middleware in the
/// top-level router.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a short link
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}
