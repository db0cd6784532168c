//! User entity.

use crate::UserId;
use serde::{Deserialize, Serialize};

/// A stored user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub description: Option<String>,
}

impl User {
    /// Replaces both mutable fields. The ID never changes.
    pub fn replace_profile(&mut self, username: String, description: Option<String>) {
        self.username = username;
        self.description = description;
    }
}

/// A user that has not been persisted yet; the store assigns the ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub description: Option<String>,
}

impl NewUser {
    #[must_use]
    pub fn new(username: impl Into<String>, description: Option<String>) -> Self {
        Self {
            username: username.into(),
            description,
        }
    }

    /// Attaches the store-assigned ID.
    #[must_use]
    pub fn with_id(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            description: self.description,
        }
    }
}
