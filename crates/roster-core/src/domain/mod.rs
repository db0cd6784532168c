//! Domain entities.

mod user;

pub use user::{NewUser, User};
