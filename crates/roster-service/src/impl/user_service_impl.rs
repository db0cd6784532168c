//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface, DEFAULT_TTL};
use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, ValidateExt};
use roster_repository::UserRepository;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// User service component for Shaku DI.
///
/// Reads go through the cache; writes go straight to the repository and leave
/// cached entries to expire on their own.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceImpl {
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    cache_ttl: Duration,
}

impl UserServiceImpl {
    /// Creates a new user service with the default cache TTL.
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self::with_ttl(user_repository, cache, DEFAULT_TTL)
    }

    /// Creates a new user service with a custom cache TTL.
    pub fn with_ttl(
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            user_repository,
            cache,
            cache_ttl,
        }
    }

    /// Returns the cached value under `key`, or loads and caches it.
    ///
    /// Errors from `load` are returned as-is and never cached. A failed cache
    /// write is logged and the loaded value is still returned.
    async fn read_through<T, F, Fut>(&self, key: Option<&str>, load: F) -> RosterResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = RosterResult<T>> + Send,
    {
        let Some(key) = key else {
            return load().await;
        };

        if let Some(cached) = self.cache.get::<T>(key).await? {
            debug!("Serving '{}' from cache", key);
            return Ok(cached);
        }

        let value = load().await?;

        if let Err(e) = self.cache.set(key, &value, self.cache_ttl).await {
            warn!("Failed to populate cache key '{}': {}", key, e);
        }

        Ok(value)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn list_users(&self) -> RosterResult<Vec<UserResponse>> {
        debug!("Listing users");

        self.read_through(Some(cache_keys::ALL_USERS), || async move {
            let users = self.user_repository.find_all().await?;
            Ok(users.into_iter().map(UserResponse::from).collect())
        })
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> RosterResult<UserResponse> {
        debug!("Getting user by username: {}", username);

        let key = cache_keys::user_by_username(username);
        self.read_through(key.as_deref(), || async move {
            self.user_repository
                .find_by_username(username)
                .await?
                .map(UserResponse::from)
                .ok_or_else(|| RosterError::not_found("User", username))
        })
        .await
    }

    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse> {
        request.validate_request()?;
        let new_user = request.into_new_user();
        debug!("Creating user: {}", new_user.username);

        if self.user_repository.exists_by_username(&new_user.username).await? {
            return Err(RosterError::duplicate(format!(
                "Username '{}' already exists",
                new_user.username
            )));
        }

        let saved_user = self.user_repository.save(&new_user).await?;

        info!("User created: {} ({})", saved_user.username, saved_user.id);
        Ok(UserResponse::from(saved_user))
    }

    async fn update_user(&self, request: UpdateUserRequest) -> RosterResult<UserResponse> {
        request.validate_request()?;
        let user = request.into_user();
        debug!("Updating user: {}", user.id);

        let updated_user = self
            .user_repository
            .update(&user)
            .await?
            .ok_or_else(|| RosterError::not_found("User", user.id))?;

        info!("User updated: {}", updated_user.id);
        Ok(UserResponse::from(updated_user))
    }

    async fn delete_user(&self, username: &str) -> RosterResult<()> {
        debug!("Deleting user: {}", username);

        let deleted = self.user_repository.delete_by_username(username).await?;

        if !deleted {
            return Err(RosterError::not_found("User", username));
        }

        info!("User deleted: {}", username);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl")
            .field("cache_enabled", &self.cache.is_enabled())
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}
