//! Port for exercise persistence.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseFilter, NewExercise};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExerciseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exercise repository query failed: {message}",
    }
}

/// Port for writing exercises and reading filtered logs.
///
/// Adapters do not check that the owning user exists; callers resolve the
/// user first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Store a validated exercise and return it with its new identifier.
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, ExerciseRepositoryError>;

    /// Return the exercises matching `filter` in insertion order, capped by
    /// the filter's limit.
    async fn find(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ExerciseRepositoryError>;
}
