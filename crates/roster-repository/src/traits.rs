//! Repository trait definitions.

use async_trait::async_trait;
use roster_core::{Interface, NewUser, RosterResult, User, UserId};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Returns every user ordered by ascending id.
    async fn find_all(&self) -> RosterResult<Vec<User>>;

    /// Finds a user by exact username.
    async fn find_by_username(&self, username: &str) -> RosterResult<Option<User>>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Checks if a username exists.
    async fn exists_by_username(&self, username: &str) -> RosterResult<bool>;

    /// Inserts a new user and returns it with its generated id.
    async fn save(&self, user: &NewUser) -> RosterResult<User>;

    /// Overwrites username and description of the row with `user.id`.
    ///
    /// Returns `None` when no such row exists.
    async fn update(&self, user: &User) -> RosterResult<Option<User>>;

    /// Deletes the user with the given username. Returns false if absent.
    async fn delete_by_username(&self, username: &str) -> RosterResult<bool>;
}
