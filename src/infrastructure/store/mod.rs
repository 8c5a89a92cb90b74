//! Key-value store backends.
//!
//! Two implementations of [`crate::domain::store::KeyValueStore`]:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store for development and tests

mod memory_store;
mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
