//! # Roster Server Library
//!
//! Wiring for the Roster binary: the Shaku module, logging setup, and the
//! serve loop with graceful shutdown.

pub mod app;
pub mod di;
pub mod logging;
pub mod startup;
