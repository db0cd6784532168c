//! # Roster Core
//!
//! Core types, traits, and error definitions shared by every Roster crate:
//! the `User` entity, the unified error type, and validation helpers.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
