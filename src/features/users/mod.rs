//! Report owners.
//!
//! Users belong to a separate account subsystem. Reports only need to look an
//! owner up by id, so this feature exposes that single lookup behind the
//! [`UserDirectory`] trait, backed by PostgreSQL or by memory.

pub mod models;
pub mod repository;

pub use models::User;
pub use repository::{PgUserDirectory, ReferenceUserDirectory, UserDirectory};
