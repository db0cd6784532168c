//! Shared fixtures for driving the router in-process.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use roster_config::ServerConfig;
use roster_core::{HealthCheck, HealthStatus, NewUser, RosterError, RosterResult, User, UserId};
use roster_repository::UserRepository;
use roster_rest::{create_router, AppState};
use roster_service::{CacheInterface, RedisCacheService, UserServiceImpl};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tower::ServiceExt;

/// In-memory store with a unique username constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: Mutex<i32>,
}

impl InMemoryUserRepository {
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn taken(users: &[User], username: &str, except: Option<UserId>) -> bool {
        users
            .iter()
            .any(|u| u.username == username && Some(u.id) != except)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> RosterResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_username(&self, username: &str) -> RosterResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> RosterResult<bool> {
        Ok(Self::taken(&self.users.lock().unwrap(), username, None))
    }

    async fn save(&self, user: &NewUser) -> RosterResult<User> {
        let mut users = self.users.lock().unwrap();
        if Self::taken(&users, &user.username, None) {
            return Err(RosterError::duplicate("users_username_key"));
        }
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let saved = user.clone().with_id(UserId(*next_id));
        users.push(saved.clone());
        Ok(saved)
    }

    async fn update(&self, user: &User) -> RosterResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if Self::taken(&users, &user.username, Some(user.id)) {
            return Err(RosterError::duplicate("users_username_key"));
        }
        Ok(users.iter_mut().find(|u| u.id == user.id).map(|existing| {
            existing.replace_profile(user.username.clone(), user.description.clone());
            existing.clone()
        }))
    }

    async fn delete_by_username(&self, username: &str) -> RosterResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.username != username);
        Ok(users.len() < before)
    }
}

/// In-memory cache honouring TTLs on the tokio clock.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .filter(|(_, expires_at)| *expires_at > Instant::now())
            .map(|(value, _)| value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Health check with a fixed answer.
pub struct FixedHealth(pub &'static str, pub HealthStatus);

#[async_trait]
impl HealthCheck for FixedHealth {
    fn name(&self) -> &str {
        self.0
    }

    async fn check(&self) -> HealthStatus {
        self.1.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub repo: Arc<InMemoryUserRepository>,
}

impl TestApp {
    /// App without a cache.
    pub fn uncached() -> Self {
        Self::build(Arc::new(RedisCacheService::disabled()), Vec::new())
    }

    /// App with an in-memory read-through cache.
    pub fn cached() -> Self {
        Self::build(Arc::new(InMemoryCache::default()), Vec::new())
    }

    pub fn with_health_checks(checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self::build(Arc::new(RedisCacheService::disabled()), checks)
    }

    fn build(cache: Arc<dyn CacheInterface>, checks: Vec<Arc<dyn HealthCheck>>) -> Self {
        let repo = Arc::new(InMemoryUserRepository::default());
        let service = Arc::new(UserServiceImpl::new(repo.clone(), cache));

        let mut state = AppState::new(service);
        for check in checks {
            state = state.with_health_check(check);
        }

        Self {
            router: create_router(state, &ServerConfig::default()),
            repo,
        }
    }

    /// Sends a request and returns the status and decoded JSON body.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
