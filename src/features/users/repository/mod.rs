use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::users::models::User;

mod postgres;
mod reference;

pub use postgres::PgUserDirectory;
pub use reference::ReferenceUserDirectory;

/// Lookup side of the account subsystem, as seen by reports
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user by id, `None` when no such user exists
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
}
