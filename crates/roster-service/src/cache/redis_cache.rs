//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool, PoolConfig, Runtime};
use roster_config::RedisConfig;
use roster_core::{HealthCheck, HealthStatus, RosterError, RosterResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Default TTL for cached items (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Redis-based cache service.
///
/// Without a pool every read misses and every write is dropped, which is how
/// the service runs when no Redis host is configured.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCacheService {
    /// Redis connection pool.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    /// Builds the cache from configuration.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces on
    /// first use rather than here.
    pub fn from_config(config: &RedisConfig) -> RosterResult<Self> {
        let Some(url) = config.url() else {
            info!("Redis host not configured; caching disabled");
            return Ok(Self::disabled());
        };

        let mut cfg = deadpool_redis::Config::from_url(url);
        cfg.pool = Some(PoolConfig::new(config.pool_size));

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| RosterError::Configuration(format!("Invalid Redis settings: {}", e)))?;

        info!(
            "Redis cache enabled at {}:{}/{}",
            config.host.as_deref().unwrap_or_default(),
            config.port,
            config.db
        );
        Ok(Self::new(Arc::new(pool)))
    }

    /// Returns the underlying pool, if caching is enabled.
    #[must_use]
    pub fn pool(&self) -> Option<Arc<Pool>> {
        self.pool.clone()
    }

    /// Closes the pool so no new connections are handed out.
    pub fn close(&self) {
        if let Some(pool) = &self.pool {
            info!("Closing Redis connection pool");
            pool.close();
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                RosterError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(RosterError::Cache("Cache is disabled".to_string())),
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            RosterError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
            RosterError::Cache(format!("Failed to set key '{}': {}", key, e))
        })?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }
}

#[async_trait]
impl HealthCheck for RedisCacheService {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Disabled;
        }

        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Unhealthy(e.to_string()),
        };

        let pong: Result<String, _> = deadpool_redis::redis::cmd("PING")
            .query_async(&mut conn)
            .await;

        match pong {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("PING failed: {}", e)),
        }
    }
}

impl std::fmt::Debug for RedisCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    fn unreachable_config() -> RedisConfig {
        RedisConfig {
            host: Some("127.0.0.1".to_string()),
            port: 1,
            ..RedisConfig::default()
        }
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());

        cache.set("users:all", &vec![1, 2, 3], DEFAULT_TTL).await.unwrap();
        let cached: Option<Vec<i32>> = cache.get("users:all").await.unwrap();
        assert!(cached.is_none());
        assert_eq!(cache.check().await, HealthStatus::Disabled);
    }

    #[test]
    fn test_from_config_without_host_is_disabled() {
        let cache = RedisCacheService::from_config(&RedisConfig::default()).unwrap();
        assert!(!cache.is_enabled());
        assert!(cache.pool().is_none());
    }

    #[test]
    fn test_from_config_with_host_is_enabled() {
        let cache = RedisCacheService::from_config(&unreachable_config()).unwrap();
        assert!(cache.is_enabled());
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_errors() {
        let cache = RedisCacheService::from_config(&unreachable_config()).unwrap();

        let err = cache.get_raw("users:all").await.unwrap_err();
        assert!(matches!(err, RosterError::Cache(_)));
        assert!(!cache.check().await.is_ok());
    }
}
