//! Driving port for logging exercises against a user.

use async_trait::async_trait;

use crate::domain::{Error, Exercise, ExerciseDraft, User, UserId};

/// Request to add an exercise to a user's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExerciseRequest {
    pub user_id: UserId,
    pub draft: ExerciseDraft,
}

/// The stored exercise together with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddExerciseResponse {
    pub user: User,
    pub exercise: Exercise,
}

/// Domain use-case port for adding exercises.
#[async_trait]
pub trait ExercisesCommand: Send + Sync {
    /// Validate and store an exercise for an existing user.
    ///
    /// Fails with `not_found` before validating the draft when the user does
    /// not exist, so nothing is stored for unknown users.
    async fn add_exercise(&self, request: AddExerciseRequest) -> Result<AddExerciseResponse, Error>;
}
