//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories run on `diesel-async` connections checked out of a `bb8`
//! pool. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module; adapters only translate between rows and domain
//! types and map database failures onto the port error types.
//!
//! # Example
//!
//! ```ignore
//! use exercise_tracker::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_exercise_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_exercise_repository::DieselExerciseRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
