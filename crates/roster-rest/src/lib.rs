//! # Roster REST
//!
//! REST API layer using Axum: user CRUD routes, health and readiness probes,
//! and Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
