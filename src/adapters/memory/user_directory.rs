//! In-memory implementation of UserDirectory.

use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::UserDirectory;

/// Set of known users held in memory.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashSet<UserId>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory that already knows `users`.
    pub fn with_users(users: impl IntoIterator<Item = UserId>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().collect()),
        }
    }

    pub async fn register(&self, user_id: UserId) {
        self.users.write().await.insert(user_id);
    }

    pub async fn remove(&self, user_id: &UserId) {
        self.users.write().await.remove(user_id);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn exists(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(user_id))
    }
}
