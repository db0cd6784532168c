//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Unified error type for Roster.
///
/// Client-facing variants (`NotFound`, `Validation`, `Duplicate`) map to 4xx
/// responses; everything else surfaces as a server error.
#[derive(Error, Debug)]
pub enum RosterError {
    // ============ Domain Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with key {key}")]
    NotFound {
        resource_type: &'static str,
        key: String,
    },

    /// Missing or empty required input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unique key already taken
    #[error("Duplicate: {0}")]
    Duplicate(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// A dependency failed its health check
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    // ============ Internal Errors ============
    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RosterError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) | Self::Duplicate(_) => 400,
            Self::Unavailable(_) => 503,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Cache(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Duplicate(_) => "DUPLICATE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Unavailable(_) => "SERVICE_UNAVAILABLE",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, key: T) -> Self {
        Self::NotFound {
            resource_type,
            key: key.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate<T: Into<String>>(message: T) -> Self {
        Self::Duplicate(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors caused by the client's request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Validation(_) | Self::Duplicate(_)
        )
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RosterError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                key: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                if db_err.code().is_some_and(|code| code == PG_UNIQUE_VIOLATION) {
                    return Self::Duplicate(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional field-level errors for validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `RosterError`.
    #[must_use]
    pub fn from_error(error: &RosterError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details: None,
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_details(mut self, details: Vec<FieldError>) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<&RosterError> for ErrorResponse {
    fn from(error: &RosterError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(RosterError::not_found("User", "alice").status_code(), 404);
        assert_eq!(RosterError::validation("username is required").status_code(), 400);
        assert_eq!(RosterError::duplicate("alice").status_code(), 400);
        assert_eq!(RosterError::Unavailable("db".to_string()).status_code(), 503);
        assert_eq!(RosterError::Database("db error".to_string()).status_code(), 500);
        assert_eq!(RosterError::Cache("down".to_string()).status_code(), 500);
        assert_eq!(RosterError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(RosterError::not_found("User", 1).error_code(), "NOT_FOUND");
        assert_eq!(RosterError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(RosterError::duplicate("dup").error_code(), "DUPLICATE");
        assert_eq!(RosterError::Cache("c".to_string()).error_code(), "CACHE_ERROR");
        assert_eq!(RosterError::internal("err").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_client_errors() {
        assert!(RosterError::not_found("User", "bob").is_client_error());
        assert!(RosterError::duplicate("bob").is_client_error());
        assert!(!RosterError::Database("lost".to_string()).is_client_error());
        assert!(!RosterError::Unavailable("redis".to_string()).is_client_error());
    }

    #[test]
    fn test_not_found_message_names_the_key() {
        let err = RosterError::not_found("User", "alice");
        let message = err.to_string();
        assert!(message.contains("User"));
        assert!(message.contains("alice"));
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err = RosterError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.status_code(), 404);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pool_timeout_maps_to_database() {
        let err = RosterError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RosterError::Database(_)));
    }

    #[test]
    fn test_error_response_from_error() {
        let err = RosterError::not_found("User", 1);
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "NOT_FOUND");
        assert!(!response.message.is_empty());
        assert!(response.details.is_none());
    }

    #[test]
    fn test_error_response_skips_empty_details() {
        let response = ErrorResponse::from(&RosterError::duplicate("alice"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], "DUPLICATE");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_error_response_with_details() {
        let err = RosterError::validation("bad input");
        let details = vec![FieldError {
            field: "username".to_string(),
            message: "username is required".to_string(),
            code: "required".to_string(),
        }];
        let response = ErrorResponse::from_error(&err).with_details(details);
        assert_eq!(response.details.map(|d| d.len()), Some(1));
    }
}
