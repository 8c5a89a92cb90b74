//! Sliding-window rate limiting middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_identity::client_identity;

/// Applies the store-backed sliding-window limiter to mutating endpoints.
///
/// The identity is derived from proxy-set client-address headers; clients
/// without one share the `"unknown"` bucket. A denied decision becomes
/// `429 Too Many Requests` with a `Retry-After` hint of one window.
///
/// Limiter store failures fail open with a warning: a degraded store should
/// slow link creation down, not take it out entirely.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = client_identity(request.headers());
    let now_ms = chrono::Utc::now().timestamp_millis();

    match state.limiter.admit(&identity, now_ms).await {
        Ok(decision) if decision.is_allowed() => Ok(next.run(request).await),
        Ok(_) => {
            info!(identity = %identity, "request rate limited");
            Err(AppError::TooManyRequests {
                retry_after_secs: state.limiter.window_secs(),
            })
        }
        Err(e) => {
            warn!(identity = %identity, error = %e, "rate limiter store failure, admitting");
            Ok(next.run(request).await)
        }
    }
}
