use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::users::models::{CreateUser, User};

use super::UserDirectory;

/// In-memory user directory
#[derive(Debug, Default)]
pub struct ReferenceUserDirectory {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    users: BTreeMap<i64, User>,
}

impl ReferenceUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, data: CreateUser) -> Result<User> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == data.email) {
            return Err(AppError::Validation(format!(
                "Email {} is already registered",
                data.email
            )));
        }

        state.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: state.last_id,
            name: data.name,
            email: data.email,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    /// Remove a user; `false` if it did not exist
    pub async fn remove_user(&self, id: i64) -> bool {
        self.state.lock().await.users.remove(&id).is_some()
    }
}

#[async_trait]
impl UserDirectory for ReferenceUserDirectory {
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }
}
