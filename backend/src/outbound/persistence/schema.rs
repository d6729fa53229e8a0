//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users. `seq` records insertion order.
    users (id) {
        id -> Uuid,
        seq -> Int8,
        username -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Logged exercises. `user_id` is a copy of the owner id without a
    /// foreign key.
    exercises (id) {
        id -> Uuid,
        seq -> Int8,
        user_id -> Uuid,
        description -> Varchar,
        duration_minutes -> Int4,
        performed_on -> Date,
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, exercises);
