//! User service trait definition.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Lists every user, ordered by id. Served from cache when possible.
    async fn list_users(&self) -> RosterResult<Vec<UserResponse>>;

    /// Gets a user by exact username. Served from cache when possible.
    async fn get_user_by_username(&self, username: &str) -> RosterResult<UserResponse>;

    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> RosterResult<UserResponse>;

    /// Replaces username and description of the user with the given id.
    async fn update_user(&self, request: UpdateUserRequest) -> RosterResult<UserResponse>;

    /// Deletes a user by username.
    async fn delete_user(&self, username: &str) -> RosterResult<()>;
}
