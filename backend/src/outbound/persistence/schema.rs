//! Diesel table definition for the SQLite schema.
//!
//! The table is created at startup by [`CREATE_USERS_TABLE`]; there are no
//! migrations. Keep the two definitions in step.

diesel::table! {
    /// Registered users.
    ///
    /// `id` is SQLite's rowid alias, allocated with `AUTOINCREMENT` so ids
    /// are never reused after a delete.
    users (id) {
        /// Primary key assigned on insert.
        id -> BigInt,
        /// Display name; never empty.
        name -> Text,
        /// Email address; unique across all rows.
        email -> Text,
    }
}

/// Idempotent DDL for the `users` table.
pub(super) const CREATE_USERS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE
)";
