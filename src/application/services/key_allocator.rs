//! Short key allocation over the shared key space.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::store::{KeyValueStore, StoreError};
use crate::utils::key_gen::{generate_key, validate_custom_key};

/// Errors that can occur while claiming a short key.
#[derive(Debug, Error)]
pub enum AllocError {
    /// The retry budget ran out without finding a free key.
    #[error("key allocation exhausted after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// A caller-chosen key is already mapped to another target.
    #[error("key '{key}' is already in use")]
    PathInUse { key: String },

    /// A caller-chosen key violates the allowed pattern.
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Allocates short keys against the shared key-value store.
///
/// Keys are random 6-character tokens checked for absence before writing.
/// The store has no compare-and-swap, so a narrow race window exists between
/// the existence check and the write; another allocation could claim the same
/// key in that window. This is accepted as best-effort behavior and must not
/// be papered over with locking the store cannot provide.
pub struct KeyAllocator {
    store: Arc<dyn KeyValueStore>,
    max_attempts: usize,
}

impl KeyAllocator {
    /// Creates an allocator with the given retry budget.
    pub fn new(store: Arc<dyn KeyValueStore>, max_attempts: usize) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    /// Allocates a fresh random key and stores `target` under it.
    ///
    /// Draws a candidate, checks the store, and writes on absence. On
    /// collision it retries with a new candidate, up to the configured
    /// budget. Retrying is a bounded loop rather than recursion so that a
    /// misbehaving store cannot exhaust the stack.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Exhausted`] when every candidate within the
    /// budget collided, or [`AllocError::Store`] on store failure.
    pub async fn allocate(&self, target: &str) -> Result<String, AllocError> {
        for attempt in 1..=self.max_attempts {
            let key = generate_key();

            if self.store.get(&key).await?.is_none() {
                self.store.put(&key, target, None).await?;
                debug!(key = %key, attempt, "allocated short key");
                return Ok(key);
            }

            warn!(key = %key, attempt, "short key collision, retrying");
        }

        Err(AllocError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    /// Claims a caller-chosen key for `target`.
    ///
    /// Performs a single existence check and a single write, with no retry:
    /// retrying a user-chosen value would silently ignore user intent, so an
    /// occupied key is reported as a conflict instead.
    ///
    /// # Errors
    ///
    /// - [`AllocError::InvalidKey`] if the key violates `^[0-9a-z-]+$` or is
    ///   reserved
    /// - [`AllocError::PathInUse`] if the key is already mapped
    /// - [`AllocError::Store`] on store failure
    pub async fn claim(&self, key: &str, target: &str) -> Result<(), AllocError> {
        validate_custom_key(key).map_err(|reason| AllocError::InvalidKey {
            key: key.to_string(),
            reason,
        })?;

        if self.store.get(key).await?.is_some() {
            return Err(AllocError::PathInUse {
                key: key.to_string(),
            });
        }

        self.store.put(key, target, None).await?;
        debug!(key = %key, "claimed custom short key");
        Ok(())
    }
}
