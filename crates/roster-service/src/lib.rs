//! # Roster Service
//!
//! Application services for Roster: validation, duplicate checks and the
//! Redis read-through cache in front of user lookups.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod user_service;

pub use cache::*;
pub use dto::*;
pub use r#impl::{UserServiceImpl, UserServiceImplParameters};
pub use user_service::*;
