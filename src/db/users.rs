use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::User;
use crate::error::{AppError, AuthError};

/// Registered users keyed by exact (case-sensitive) username.
#[derive(Clone, Default)]
pub struct UserDirectory {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn exists(&self, username: &str) -> bool {
        self.users.read().await.contains_key(username)
    }

    pub async fn get(&self, username: &str) -> Option<User> {
        self.users.read().await.get(username).cloned()
    }

    /// Fails with `UserExists` if the name was taken, even by a registration
    /// that raced past an earlier `exists` check.
    pub async fn insert(&self, user: User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(AuthError::UserExists(user.username).into());
        }
        users.insert(user.username.clone(), user);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }
}
