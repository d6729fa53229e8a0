//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed users and exercises, the exercise-log
//! filter, and the use-case services behind the HTTP adapter. Everything here
//! is transport agnostic; adapters translate to and from these types.

pub mod error;
pub mod exercise;
pub mod exercise_log;
mod exercise_service;
pub mod ports;
pub mod trace_id;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{
    DESCRIPTION_MAX, DISPLAY_DATE_FORMAT, DURATION_MAX, Description, DurationMinutes, Exercise,
    ExerciseDate, ExerciseDraft, ExerciseId, ExerciseValidationError, NewExercise,
};
pub use self::exercise_log::{ExerciseFilter, ExerciseLog, LogQuery, LogQueryError};
pub use self::exercise_service::ExerciseService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
pub use self::user_service::UserService;
