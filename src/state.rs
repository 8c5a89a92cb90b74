use std::sync::Arc;

use crate::application::services::{CodeImageRenderer, KeyAllocator, RateLimiter};
use crate::domain::store::KeyValueStore;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub allocator: Arc<KeyAllocator>,
    pub limiter: Arc<RateLimiter>,
    pub renderer: CodeImageRenderer,
    /// Public base URL prepended to short keys (no trailing slash).
    pub base_url: String,
}

impl AppState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        allocator: Arc<KeyAllocator>,
        limiter: Arc<RateLimiter>,
        renderer: CodeImageRenderer,
        base_url: String,
    ) -> Self {
        Self {
            store,
            allocator,
            limiter,
            renderer,
            base_url,
        }
    }
}
