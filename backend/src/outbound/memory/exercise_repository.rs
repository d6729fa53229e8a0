//! In-memory `ExerciseRepository`.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{ExerciseRepository, ExerciseRepositoryError};
use crate::domain::{Exercise, ExerciseFilter, ExerciseId, NewExercise};

/// Exercise store backed by a vector guarded by an async read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryExerciseRepository {
    exercises: RwLock<Vec<Exercise>>,
}

impl InMemoryExerciseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryExerciseRepository {
    async fn create(&self, exercise: &NewExercise) -> Result<Exercise, ExerciseRepositoryError> {
        let stored = Exercise::new(ExerciseId::random(), exercise.clone());
        self.exercises.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        filter: &ExerciseFilter,
    ) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        let limit = filter
            .limit()
            .and_then(|limit| usize::try_from(limit).ok())
            .unwrap_or(usize::MAX);
        let exercises = self.exercises.read().await;
        Ok(exercises
            .iter()
            .filter(|exercise| filter.matches(exercise))
            .take(limit)
            .cloned()
            .collect())
    }
}
