//! Exercise domain service.
//!
//! Resolves the owning user before touching exercises, so unknown users
//! surface as `not_found` and never receive entries. Default dates come from
//! the injected clock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AddExerciseRequest, AddExerciseResponse, ExerciseLogQuery, ExerciseRepository,
    ExerciseRepositoryError, ExercisesCommand, GetExerciseLogRequest, UserRepository,
};
use crate::domain::user_service::map_user_repository_error;
use crate::domain::{
    Error, ExerciseDate, ExerciseFilter, ExerciseLog, ExerciseValidationError, LogQueryError,
    User, UserId,
};

fn map_exercise_repository_error(error: ExerciseRepositoryError) -> Error {
    match error {
        ExerciseRepositoryError::Connection { message } => {
            error!(%message, "exercise repository unavailable");
            Error::service_unavailable("exercise repository unavailable")
        }
        ExerciseRepositoryError::Query { message } => {
            error!(%message, "exercise repository query failed");
            Error::internal(format!("exercise repository error: {message}"))
        }
    }
}

fn map_validation_error(error: ExerciseValidationError) -> Error {
    let details = match error.value() {
        Some(value) => json!({
            "field": error.field(),
            "value": value,
            "code": error.code(),
        }),
        None => json!({
            "field": error.field(),
            "code": error.code(),
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

fn map_log_query_error(error: LogQueryError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "value": error.value(),
        "code": error.code(),
    }))
}

/// Exercise service implementing the add and log use-cases.
#[derive(Clone)]
pub struct ExerciseService<U, E> {
    user_repo: Arc<U>,
    exercise_repo: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U, E> ExerciseService<U, E> {
    /// Create a new service from its repositories and clock.
    pub fn new(user_repo: Arc<U>, exercise_repo: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            user_repo,
            exercise_repo,
            clock,
        }
    }
}

impl<U, E> ExerciseService<U, E>
where
    U: UserRepository,
{
    async fn resolve_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("user {user_id} not found"))
                    .with_details(json!({ "userId": user_id.as_ref() }))
            })
    }
}

#[async_trait]
impl<U, E> ExercisesCommand for ExerciseService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn add_exercise(
        &self,
        request: AddExerciseRequest,
    ) -> Result<AddExerciseResponse, Error> {
        let AddExerciseRequest { user_id, draft } = request;
        let user = self.resolve_user(&user_id).await?;

        let today = ExerciseDate::today(self.clock.as_ref());
        let new_exercise = draft
            .validate(user.id().clone(), today)
            .map_err(map_validation_error)?;

        let exercise = self
            .exercise_repo
            .create(&new_exercise)
            .await
            .map_err(map_exercise_repository_error)?;
        info!(
            user_id = %user.id(),
            exercise_id = %exercise.id(),
            "exercise logged"
        );

        Ok(AddExerciseResponse { user, exercise })
    }
}

#[async_trait]
impl<U, E> ExerciseLogQuery for ExerciseService<U, E>
where
    U: UserRepository,
    E: ExerciseRepository,
{
    async fn get_log(&self, request: GetExerciseLogRequest) -> Result<ExerciseLog, Error> {
        let GetExerciseLogRequest { user_id, query } = request;
        let user = self.resolve_user(&user_id).await?;
        let filter = ExerciseFilter::for_log(&user, &query).map_err(map_log_query_error)?;

        if filter.is_unsatisfiable() {
            debug!(user_id = %user.id(), "log filter cannot match; skipping query");
            return Ok(ExerciseLog::new(user, Vec::new()));
        }

        let entries = self
            .exercise_repo
            .find(&filter)
            .await
            .map_err(map_exercise_repository_error)?;

        Ok(ExerciseLog::new(user, entries))
    }
}

#[cfg(test)]
#[path = "exercise_service_tests.rs"]
mod tests;
