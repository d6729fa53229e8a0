//! In-memory `UserRepository`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId, Username};

/// User store backed by a vector guarded by an async read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, username: &Username) -> Result<User, UserRepositoryError> {
        let user = User::new(UserId::random(), username.clone());
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }
}
