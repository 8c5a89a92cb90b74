//! In-process key-value store for development and tests.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::store::{KeyValueStore, StoreResult};

struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

/// A `HashMap`-backed store with lazy TTL expiry.
///
/// Used when Redis is not configured and as the backend for integration
/// tests. Expired entries are dropped on access, mirroring the lazy expiry
/// visible to consumers of the real backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    /// Number of live (non-expired) entries. Test helper.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock().await;
        entries
            .values()
            .filter(|e| e.expires_at.is_none_or(|at| at > now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut entries = self.entries.lock().await;

        if let Some(entry) = entries.get(key) {
            if entry.expires_at.is_some_and(|at| at <= Instant::now()) {
                entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }

        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl)),
        };

        self.entries.lock().await.insert(key.to_string(), entry);
        Ok(())
    }
}
