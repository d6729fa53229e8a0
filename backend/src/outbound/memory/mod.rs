//! Process-local repositories used when no database is configured.
//!
//! State lives for the lifetime of the process and is lost on restart. Both
//! adapters keep records in insertion order so listings and logs match the
//! PostgreSQL adapters.

mod exercise_repository;
mod user_repository;

pub use exercise_repository::InMemoryExerciseRepository;
pub use user_repository::InMemoryUserRepository;
