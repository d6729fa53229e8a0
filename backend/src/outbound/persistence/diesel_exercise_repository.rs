//! PostgreSQL-backed `ExerciseRepository` implementation using Diesel ORM.
//!
//! Log reads are built as boxed queries so the optional date bounds and limit
//! are only applied when the filter carries them. Entries come back in
//! insertion order via the `seq` column.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseFilter, ExerciseId, NewExercise,
    UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercises;

/// Diesel-backed implementation of the exercise repository port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExerciseRepositoryError {
    map_basic_pool_error(error, ExerciseRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExerciseRepositoryError {
    map_basic_diesel_error(
        error,
        ExerciseRepositoryError::query,
        ExerciseRepositoryError::connection,
    )
}

fn duration_to_column(duration: DurationMinutes) -> Result<i32, ExerciseRepositoryError> {
    i32::try_from(duration.get()).map_err(|_| {
        ExerciseRepositoryError::query(format!(
            "duration {} exceeds column range",
            duration.get()
        ))
    })
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExerciseRepositoryError> {
    let ExerciseRow {
        id,
        user_id,
        description,
        duration_minutes,
        performed_on,
    } = row;

    let invalid = |err: &dyn std::fmt::Display| {
        ExerciseRepositoryError::query(format!("stored exercise {id}: {err}"))
    };
    let description = Description::new(&description).map_err(|err| invalid(&err))?;
    let minutes = u32::try_from(duration_minutes).map_err(|err| invalid(&err))?;
    let duration = DurationMinutes::new(minutes).map_err(|err| invalid(&err))?;

    Ok(Exercise::new(
        ExerciseId::from_uuid(id),
        NewExercise {
            user_id: UserId::from_uuid(user_id),
            description,
            duration,
            date: ExerciseDate::new(performed_on),
        },
    ))
}

fn log_query(filter: &ExerciseFilter) -> exercises::BoxedQuery<'static, Pg> {
    let mut query = exercises::table
        .filter(exercises::user_id.eq(*filter.user_id().as_uuid()))
        .order(exercises::seq.asc())
        .into_boxed();

    if let Some(from) = filter.from() {
        query = query.filter(exercises::performed_on.ge(from.as_naive()));
    }
    if let Some(to) = filter.to() {
        query = query.filter(exercises::performed_on.le(to.as_naive()));
    }
    if let Some(limit) = filter.limit() {
        query = query.limit(i64::from(limit));
    }
    query
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = ExerciseId::random();
        let new_row = NewExerciseRow {
            id: *id.as_uuid(),
            user_id: *exercise.user_id.as_uuid(),
            description: exercise.description.as_ref(),
            duration_minutes: duration_to_column(exercise.duration)?,
            performed_on: exercise.date.as_naive(),
        };

        let row = diesel::insert_into(exercises::table)
            .values(&new_row)
            .returning(ExerciseRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_exercise(row)
    }

    async fn find(
        &self,
        filter: &ExerciseFilter,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ExerciseRow> = log_query(filter)
            .select(ExerciseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_exercise).collect()
    }
}
