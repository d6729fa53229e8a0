//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound persistence
//! adapters. Driving ports (commands and queries) are implemented by domain
//! services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod exercise_log_query;
mod exercise_repository;
mod exercises_command;
mod user_repository;
mod users_command;
mod users_query;

pub use exercise_log_query::{ExerciseLogQuery, GetExerciseLogRequest};
#[cfg(test)]
pub use exercise_repository::MockExerciseRepository;
pub use exercise_repository::{ExerciseRepository, ExerciseRepositoryError};
pub use exercises_command::{AddExerciseRequest, AddExerciseResponse, ExercisesCommand};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
