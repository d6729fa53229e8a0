//! Builders wiring repositories and services into [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use exercise_tracker::domain::ports::{ExerciseRepository, UserRepository};
use exercise_tracker::domain::{ExerciseService, UserService};
use exercise_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
use exercise_tracker::outbound::persistence::{DieselExerciseRepository, DieselUserRepository};

use super::ServerConfig;

fn build_services<U, E>(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> HttpState
where
    U: UserRepository + 'static,
    E: ExerciseRepository + 'static,
{
    let user_service = Arc::new(UserService::new(users.clone()));
    let exercise_service = Arc::new(ExerciseService::new(users, exercises, clock));
    HttpState::new(HttpStatePorts {
        users_command: user_service.clone(),
        users_query: user_service,
        exercises: exercise_service.clone(),
        exercise_log: exercise_service,
    })
}

/// Build HTTP state over PostgreSQL when a pool is configured, otherwise over
/// process-local repositories.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    match &config.db_pool {
        Some(pool) => {
            info!(persistence = "postgres", "wiring repositories");
            build_services(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselExerciseRepository::new(pool.clone())),
                clock,
            )
        }
        None => {
            info!(persistence = "memory", "wiring repositories");
            build_services(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryExerciseRepository::new()),
                clock,
            )
        }
    }
}
