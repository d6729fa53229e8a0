//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories built on Diesel
//! - **memory**: process-local repositories for running without a database
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
