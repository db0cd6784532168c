//! User-related DTOs.

use roster_core::{NewUser, User, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

/// Request to create a new user.
///
/// Fields are optional at the type level so that a missing field is reported
/// as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,
}

impl CreateUserRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            description: Some(description.into()),
        }
    }

    /// Converts a validated request into an unsaved user.
    #[must_use]
    pub fn into_new_user(self) -> NewUser {
        NewUser::new(self.username.unwrap_or_default(), self.description)
    }
}

/// Request to replace a user's username and description, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(
        required(message = "id is required"),
        custom(function = "validate_non_zero_id")
    )]
    pub id: Option<i32>,

    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description must not be empty")
    )]
    pub description: Option<String>,
}

/// Zero is the only id rejected outright; any other value goes to the lookup.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn validate_non_zero_id(id: i32) -> Result<(), ValidationError> {
    if id == 0 {
        return Err(
            ValidationError::new("non_zero").with_message(Cow::Borrowed("id must not be zero"))
        );
    }
    Ok(())
}

impl UpdateUserRequest {
    #[must_use]
    pub fn new(id: i32, username: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            username: Some(username.into()),
            description: Some(description.into()),
        }
    }

    /// Converts a validated request into the full replacement row.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: UserId(self.id.unwrap_or_default()),
            username: self.username.unwrap_or_default(),
            description: self.description,
        }
    }
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub description: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            description: user.description,
        }
    }
}

/// Acknowledgement body, `{"status": "ok"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ok")]
    pub status: String,
}

impl StatusResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
