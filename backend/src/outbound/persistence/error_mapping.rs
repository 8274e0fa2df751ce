//! Mapping from Diesel and connection failures to user persistence errors.

use diesel::result::{ConnectionError, DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

/// SQLite reports constraint failures with this prefix, e.g.
/// `UNIQUE constraint failed: users.email`.
const UNIQUE_FAILURE_PREFIX: &str = "UNIQUE constraint failed";

/// Map a failure to open the database file.
pub(super) fn map_connection_error(error: &ConnectionError) -> UserPersistenceError {
    debug!(%error, "sqlite connection failed");
    UserPersistenceError::connection(error.to_string())
}

/// Map Diesel errors into connection, query, or duplicate-email errors.
///
/// The only unique constraint on the schema is `users.email`, so every
/// unique violation is reported as a duplicate email.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::duplicate_email(info.message())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if info.message().starts_with(UNIQUE_FAILURE_PREFIX) => {
            UserPersistenceError::duplicate_email(info.message())
        }
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message()),
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        other => UserPersistenceError::query(other.to_string()),
    }
}
