//! # Roster Config
//!
//! Configuration management for Roster.
//! Supports layered configuration from files and environment variables,
//! including the plain `DB_*` / `REDIS_*` variables used by container
//! deployments.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
