//! Sliding-window rate limiting backed by the key-value store.
//!
//! Each identity's request timestamps are kept as a JSON array under
//! `rate:<identity>` with a store-level expiry equal to the window. The
//! read-prune-append-write cycle is a non-atomic read-modify-write: two
//! concurrent requests from the same identity can both observe a stale count
//! and slightly under-enforce the limit. The store cannot provide the atomic
//! primitives to close that race, so the limiter is documented as
//! approximate rather than pretending otherwise.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::store::{KeyValueStore, StoreError};

/// Prefix for rate window records in the store.
const RATE_KEY_PREFIX: &str = "rate:";

/// Outcome of an admission check. A denial is a normal result the caller
/// must reflect as an over-limit response, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

/// Errors that can occur during an admission check.
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode rate window record: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store-backed sliding-window limiter.
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    window_ms: i64,
    max_requests: usize,
}

impl RateLimiter {
    /// Creates a limiter admitting `max_requests` per `window_ms` per identity.
    pub fn new(store: Arc<dyn KeyValueStore>, window_ms: i64, max_requests: usize) -> Self {
        Self {
            store,
            window_ms,
            max_requests,
        }
    }

    /// Length of the sliding window in seconds, used as the record TTL and
    /// as the `Retry-After` hint on denials.
    pub fn window_secs(&self) -> u64 {
        (self.window_ms / 1000).max(1) as u64
    }

    /// Checks whether a request from `identity` at `now_ms` is admitted.
    ///
    /// Reads the identity's timestamp record, prunes entries older than the
    /// window, and compares the remainder against the limit. On admission the
    /// current timestamp is appended and the record persisted with a TTL of
    /// one window; on denial nothing is written, so repeated rejected
    /// requests neither grow the record nor extend the denial.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitError::Store`] if a store round-trip fails. Callers
    /// decide the failure policy; the HTTP middleware fails open.
    pub async fn admit(&self, identity: &str, now_ms: i64) -> Result<Decision, RateLimitError> {
        let record_key = format!("{}{}", RATE_KEY_PREFIX, identity);

        let mut timestamps: Vec<i64> = match self.store.get(&record_key).await? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(identity, error = %e, "corrupt rate window record, resetting");
                Vec::new()
            }),
            None => Vec::new(),
        };

        timestamps.retain(|&t| now_ms - t < self.window_ms);

        if timestamps.len() >= self.max_requests {
            debug!(identity, count = timestamps.len(), "rate limit exceeded");
            return Ok(Decision::Denied);
        }

        timestamps.push(now_ms);

        let encoded = serde_json::to_string(&timestamps)?;
        self.store
            .put(&record_key, &encoded, Some(self.window_secs()))
            .await?;

        Ok(Decision::Allowed)
    }
}
