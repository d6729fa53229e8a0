//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ExerciseLogQuery, ExercisesCommand, UsersCommand, UsersQuery};

/// Parameter object bundling the port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub exercises: Arc<dyn ExercisesCommand>,
    pub exercise_log: Arc<dyn ExerciseLogQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_command: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub exercises: Arc<dyn ExercisesCommand>,
    pub exercise_log: Arc<dyn ExerciseLogQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use exercise_tracker::domain::{ExerciseService, UserService};
    /// use exercise_tracker::inbound::http::state::{HttpState, HttpStatePorts};
    /// use exercise_tracker::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let exercises = Arc::new(ExerciseService::new(
    ///     users.clone(),
    ///     Arc::new(InMemoryExerciseRepository::new()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let user_service = Arc::new(UserService::new(users));
    /// let state = HttpState::new(HttpStatePorts {
    ///     users_command: user_service.clone(),
    ///     users_query: user_service,
    ///     exercises: exercises.clone(),
    ///     exercise_log: exercises,
    /// });
    /// let _log = state.exercise_log.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            users_command,
            users_query,
            exercises,
            exercise_log,
        } = ports;
        Self {
            users_command,
            users_query,
            exercises,
            exercise_log,
        }
    }
}
