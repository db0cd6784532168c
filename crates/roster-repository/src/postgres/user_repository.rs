//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// PostgreSQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct PgUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    username: String,
    description: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId(row.id),
            username: row.username,
            description: row.description,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> RosterResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, description FROM users ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> RosterResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, description FROM users WHERE username = $1 ORDER BY id LIMIT 1",
        )
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, description FROM users WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn exists_by_username(&self, username: &str) -> RosterResult<bool> {
        let result: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM users WHERE username = $1 LIMIT 1")
                .bind(username)
                .fetch_optional(self.pool.inner())
                .await?;

        Ok(result.is_some())
    }

    async fn save(&self, user: &NewUser) -> RosterResult<User> {
        debug!("Inserting user: {}", user.username);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, description)
            VALUES ($1, $2)
            RETURNING id, username, description
            "#,
        )
        .bind(&user.username)
        .bind(&user.description)
        .fetch_one(self.pool.inner())
        .await?;

        info!("Inserted user {} with id {}", row.username, row.id);
        Ok(row.into())
    }

    async fn update(&self, user: &User) -> RosterResult<Option<User>> {
        debug!("Updating user id: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, description = $3
            WHERE id = $1
            RETURNING id, username, description
            "#,
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.description)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete_by_username(&self, username: &str) -> RosterResult<bool> {
        debug!("Deleting user: {}", username);

        let result = sqlx::query("DELETE FROM users WHERE username = $1")
            .bind(username)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_maps_to_user() {
        let row = UserRow {
            id: 4,
            username: "alice".to_string(),
            description: None,
        };
        let user = User::from(row);
        assert_eq!(user.id, UserId(4));
        assert_eq!(user.username, "alice");
        assert!(user.description.is_none());
    }
}
