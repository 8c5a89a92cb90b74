//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its destination URL.
///
/// # Endpoint
///
/// `GET /{key}`
///
/// # Errors
///
/// Returns 404 Not Found if the short key does not exist.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .store
        .get(&key)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "key": key })))?;

    debug!(key = %key, target = %target, "redirecting");

    Ok(Redirect::temporary(&target))
}
