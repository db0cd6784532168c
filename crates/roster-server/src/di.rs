//! Dependency injection module using Shaku.

use roster_config::AppConfig;
use roster_core::{HealthCheck, RosterResult};
use roster_repository::{
    create_pool, DatabasePool, DatabasePoolInterface, DatabasePoolParameters, PgUserRepository,
    UserRepository,
};
use roster_service::{
    CacheInterface, RedisCacheService, RedisCacheServiceParameters, UserService, UserServiceImpl,
    UserServiceImplParameters,
};
use shaku::{module, HasComponent};
use std::sync::Arc;
use std::time::Duration;

// Single-process module: pool, repository, cache and the user service.
module! {
    pub RosterModule {
        components = [
            DatabasePool,
            PgUserRepository,
            RedisCacheService,
            UserServiceImpl,
        ],
        providers = [],
    }
}

impl RosterModule {
    /// Builds the module around already constructed pools.
    #[must_use]
    pub fn from_parts(database: &DatabasePool, cache: &RedisCacheService, cache_ttl: Duration) -> Self {
        Self::builder()
            .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
                pool: database.pg_pool(),
            })
            .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
                pool: cache.pool(),
            })
            .with_component_parameters::<UserServiceImpl>(UserServiceImplParameters { cache_ttl })
            .build()
    }

    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.resolve()
    }

    pub fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.resolve()
    }

    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.resolve()
    }
}

/// The module plus the concrete pool handles owned by the process.
///
/// The handles share their connections with the components inside the
/// module, so closing them here closes them for every component.
pub struct AppModule {
    pub module: Arc<RosterModule>,
    database: Arc<DatabasePool>,
    cache: Arc<RedisCacheService>,
}

impl AppModule {
    /// Connects to PostgreSQL, bootstraps the schema, prepares the cache pool
    /// and assembles the module.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let database = create_pool(&config.database).await?;
        let cache = Arc::new(RedisCacheService::from_config(&config.redis)?);
        Ok(Self::from_parts(database, cache, config.cache.ttl()))
    }

    #[must_use]
    pub fn from_parts(
        database: Arc<DatabasePool>,
        cache: Arc<RedisCacheService>,
        cache_ttl: Duration,
    ) -> Self {
        let module = Arc::new(RosterModule::from_parts(&database, &cache, cache_ttl));
        Self {
            module,
            database,
            cache,
        }
    }

    /// Dependencies probed by the readiness route.
    #[must_use]
    pub fn health_checks(&self) -> Vec<Arc<dyn HealthCheck>> {
        vec![self.database.clone(), self.cache.clone()]
    }

    /// Closes the database and cache pools.
    pub async fn close(&self) {
        self.cache.close();
        self.database.close().await;
    }
}
