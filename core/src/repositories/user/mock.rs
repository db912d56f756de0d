//! Mock implementation of UserDirectory for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::r#trait::UserDirectory;

/// In-memory user directory for testing
pub struct MockUserDirectory {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserDirectory {
    /// Create an empty mock directory
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a user record
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Replace a user record (e.g. to simulate a role change)
    pub async fn update(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Remove a user record
    pub async fn remove(&self, user_id: Uuid) {
        self.users.write().await.remove(&user_id);
    }
}

impl Default for MockUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MockUserDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&user_id).cloned())
    }
}
