//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{Error, User, Username};

pub(crate) fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("user repository unavailable")
        }
        UserRepositoryError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// User service implementing the create and list use-cases.
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service with the user repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, username: Username) -> Result<User, Error> {
        let user = self
            .user_repo
            .create(&username)
            .await
            .map_err(map_user_repository_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list()
            .await
            .map_err(map_user_repository_error)
    }
}
