//! Driving port for user-facing queries.
//!
//! Inbound adapters use this port to fetch users without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every registered user in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
