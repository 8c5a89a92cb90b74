//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, service wiring, and the Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;

use crate::application::services::{CodeImageRenderer, KeyAllocator, RateLimiter, RenderConfig};
use crate::config::Config;
use crate::domain::store::KeyValueStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes the key-value store (Redis when configured, otherwise an
/// in-process store for development), the allocator, limiter, and renderer,
/// then serves the router until the process is stopped.
///
/// # Errors
///
/// Returns an error if the Redis connection, the bind, or the server
/// runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn KeyValueStore> = match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisStore::connect(redis_url).await?;
            tracing::info!("Store backend: Redis");
            Arc::new(redis)
        }
        None => {
            tracing::warn!("REDIS_URL not set, using in-memory store (data is not persisted)");
            Arc::new(MemoryStore::new())
        }
    };

    let allocator = Arc::new(KeyAllocator::new(store.clone(), config.alloc_max_attempts));
    let limiter = Arc::new(RateLimiter::new(
        store.clone(),
        config.rate_limit_window_ms,
        config.rate_limit_max_requests,
    ));
    let renderer = CodeImageRenderer::new(RenderConfig::default());

    let state = AppState::new(store, allocator, limiter, renderer, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
