#![allow(dead_code)]

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use snaplink::api::handlers::{health_handler, qr_handler, redirect_handler, shorten_handler};
use snaplink::api::middleware::rate_limit;
use snaplink::application::services::{
    CodeImageRenderer, KeyAllocator, RateLimiter, RenderConfig,
};
use snaplink::infrastructure::store::MemoryStore;
use snaplink::state::AppState;

pub const TEST_BASE_URL: &str = "https://s.example.com";

pub const WINDOW_MS: i64 = 60_000;
pub const MAX_REQUESTS: usize = 10;

/// Builds a test state over a fresh in-memory store.
pub fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    create_test_state_with_limits(WINDOW_MS, MAX_REQUESTS)
}

/// Builds a test state with custom rate-limit bounds.
pub fn create_test_state_with_limits(
    window_ms: i64,
    max_requests: usize,
) -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());

    let allocator = Arc::new(KeyAllocator::new(store.clone(), 10));
    let limiter = Arc::new(RateLimiter::new(store.clone(), window_ms, max_requests));
    let renderer = CodeImageRenderer::new(RenderConfig::default());

    let state = AppState::new(
        store.clone(),
        allocator,
        limiter,
        renderer,
        TEST_BASE_URL.to_string(),
    );

    (state, store)
}

/// Full application router over the given state, including the rate-limit
/// middleware on the API routes.
pub fn app(state: AppState) -> Router {
    let api_router = Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::layer,
        ));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .route("/{key}/qr", get(qr_handler))
        .nest("/api", api_router)
        .with_state(state)
}
