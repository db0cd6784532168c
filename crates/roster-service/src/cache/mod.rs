//! Read-through caching for the service layer.
//!
//! Entries are JSON values under a fixed TTL. Nothing deletes them early, so
//! reads may be stale for up to one TTL after a write.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
