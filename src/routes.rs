//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`     - Health check: store reachability (public)
//! - `GET  /{key}`      - Short link redirect (public)
//! - `GET  /{key}/qr`   - QR code SVG for the short link (public)
//! - `POST /api/shorten` - Short link creation (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-identity sliding window over the store
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, qr_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes().route_layer(middleware::from_fn_with_state(
        state.clone(),
        rate_limit::layer,
    ));

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .route("/{key}/qr", get(qr_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
