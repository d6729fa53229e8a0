//! Driving port for reading a user's exercise log.

use async_trait::async_trait;

use crate::domain::{Error, ExerciseLog, LogQuery, UserId};

/// Request for a filtered exercise log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetExerciseLogRequest {
    pub user_id: UserId,
    pub query: LogQuery,
}

/// Domain use-case port for exercise logs.
#[async_trait]
pub trait ExerciseLogQuery: Send + Sync {
    /// Return the user's exercises filtered by the request parameters.
    async fn get_log(&self, request: GetExerciseLogRequest) -> Result<ExerciseLog, Error>;
}
