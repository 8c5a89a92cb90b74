//! Redis-backed key-value store implementation.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::store::{KeyValueStore, StoreError, StoreResult};

/// Redis store used as the system of record for short links and rate
/// windows.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection
/// reuse. Errors propagate to callers: unlike a cache, a failed write here
/// would lose a short link, so there is no fail-open behavior.
pub struct RedisStore {
    client: ConnectionManager,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.clone();

        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| StoreError::Operation(format!("Redis GET {}: {}", key, e)))?;

        debug!(key, hit = value.is_some(), "store GET");
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()> {
        let mut conn = self.client.clone();

        match ttl_seconds {
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key, value, ttl)
                    .await
                    .map_err(|e| StoreError::Operation(format!("Redis SETEX {}: {}", key, e)))?;
                debug!(key, ttl, "store SET with TTL");
            }
            None => {
                conn.set::<_, _, ()>(key, value)
                    .await
                    .map_err(|e| StoreError::Operation(format!("Redis SET {}: {}", key, e)))?;
                debug!(key, "store SET");
            }
        }

        Ok(())
    }
}
