//! Key-value store trait and error types.
//!
//! The store is eventually consistent and offers no compare-and-swap, so all
//! consumers (key allocation, rate limiting) are best-effort under
//! concurrency by design.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store operation error: {0}")]
    Operation(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous key-value store with optional per-entry expiry.
///
/// This is the only shared mutable resource in the system. It provides no
/// transactional guarantees: a check-then-write sequence can race with
/// concurrent writers, and consumers must tolerate that.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Production Redis backend
/// - [`crate::infrastructure::store::MemoryStore`] - In-process store for
///   development and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Retrieves the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if present
    /// - `Ok(None)` if absent or expired
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unreachable or the operation
    /// fails. Unlike a cache, store errors propagate: this store is the
    /// system of record for short links.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any existing entry.
    ///
    /// # Arguments
    ///
    /// - `ttl_seconds` - expiry applied to the entry; `None` stores the entry
    ///   without expiry
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails.
    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()>;
}
