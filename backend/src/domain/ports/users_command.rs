//! Driving port for registering users.

use async_trait::async_trait;

use crate::domain::{Error, User, Username};

/// Domain use-case port for creating users.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a user and return the stored record.
    async fn create_user(&self, username: Username) -> Result<User, Error>;
}
