//! # Roster Repository
//!
//! Data access for the `users` table.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>
//! PgUserRepository
//!   ↓  Arc<dyn DatabasePoolInterface>
//! DatabasePool (sqlx::PgPool)
//!   ↓
//! PostgreSQL
//! ```

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::*;
pub use postgres::*;
pub use traits::*;
