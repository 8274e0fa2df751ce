//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use diesel::sql_types::BigInt;

use crate::domain::User;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl UserRow {
    /// Rehydrate a domain user. `NOT NULL` is the only storage invariant.
    pub(crate) fn into_domain(self) -> User {
        let Self { id, name, email } = self;
        User::from_stored(id, name, email)
    }
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Changeset struct for overwriting existing user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

/// Result row for `SELECT last_insert_rowid()`.
#[derive(Debug, QueryableByName)]
pub(crate) struct LastInsertRowId {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}
