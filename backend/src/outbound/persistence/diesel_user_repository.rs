//! SQLite-backed `UserRepository` implementation using Diesel ORM.
//!
//! Each method opens its own connection through [`with_connection`], runs a
//! single statement, and releases the connection before returning. The
//! repository keeps a running count of rows it has written so operators can
//! inspect write activity since start-up.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::connection::{SqliteStoreConfig, ensure_parent_dir, with_connection};
use super::error_mapping::map_diesel_error;
use super::models::{LastInsertRowId, NewUserRow, UserRow, UserUpdate};
use super::schema::{CREATE_USERS_TABLE, users};

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    config: Arc<SqliteStoreConfig>,
    changes: Arc<AtomicU64>,
}

impl DieselUserRepository {
    /// Create a repository for the configured database file.
    ///
    /// No connection is opened until the first call.
    pub fn new(config: SqliteStoreConfig) -> Self {
        Self {
            config: Arc::new(config),
            changes: Arc::new(AtomicU64::new(0)),
        }
    }

    fn record_changes(&self, rows: usize) {
        let rows = u64::try_from(rows).unwrap_or(u64::MAX);
        self.changes.fetch_add(rows, Ordering::Relaxed);
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn initialize(&self) -> Result<(), UserPersistenceError> {
        let config = Arc::clone(&self.config);
        tokio::task::spawn_blocking(move || ensure_parent_dir(&config))
            .await
            .map_err(|err| UserPersistenceError::query(format!("initialize aborted: {err}")))??;

        with_connection(Arc::clone(&self.config), "initialize", |conn| {
            diesel::sql_query(CREATE_USERS_TABLE)
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await?;
        debug!(database = %self.config.database_path().display(), "users schema ready");
        Ok(())
    }

    async fn create(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError> {
        let name = draft.name().as_ref().to_owned();
        let email = draft.email().as_ref().to_owned();

        let id = with_connection(Arc::clone(&self.config), "create user", move |conn| {
            diesel::insert_into(users::table)
                .values(&NewUserRow {
                    name: &name,
                    email: &email,
                })
                .execute(conn)
                .map_err(map_diesel_error)?;

            // last_insert_rowid is scoped to the connection, so it cannot
            // observe another request's insert.
            let row: LastInsertRowId = diesel::sql_query("SELECT last_insert_rowid() AS id")
                .get_result(conn)
                .map_err(map_diesel_error)?;
            Ok(row.id)
        })
        .await?;

        self.record_changes(1);
        debug!(user_id = id, "user created");
        Ok(UserId::new(id))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let row = with_connection(Arc::clone(&self.config), "find user", move |conn| {
            users::table
                .filter(users::id.eq(id.get()))
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error)
        })
        .await?;

        Ok(row.map(UserRow::into_domain))
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let rows = with_connection(Arc::clone(&self.config), "list users", |conn| {
            users::table
                .select(UserRow::as_select())
                .load::<UserRow>(conn)
                .map_err(map_diesel_error)
        })
        .await?;

        Ok(rows.into_iter().map(UserRow::into_domain).collect())
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<(), UserPersistenceError> {
        let name = draft.name().as_ref().to_owned();
        let email = draft.email().as_ref().to_owned();

        let updated = with_connection(Arc::clone(&self.config), "update user", move |conn| {
            diesel::update(users::table.filter(users::id.eq(id.get())))
                .set(&UserUpdate {
                    name: &name,
                    email: &email,
                })
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await?;

        self.record_changes(updated);
        debug!(user_id = %id, rows = updated, "user update applied");
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let deleted = with_connection(Arc::clone(&self.config), "delete user", move |conn| {
            diesel::delete(users::table.filter(users::id.eq(id.get())))
                .execute(conn)
                .map_err(map_diesel_error)
        })
        .await?;

        self.record_changes(deleted);
        debug!(user_id = %id, rows = deleted, "user delete applied");
        Ok(())
    }

    fn total_changes(&self) -> u64 {
        self.changes.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    //! Reads of rows written by other clients of the same database file.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn rows_with_blank_names_are_still_listed() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = DieselUserRepository::new(SqliteStoreConfig::new(dir.path().join("CRUD.db")));
        repo.initialize().await.expect("schema");

        with_connection(Arc::clone(&repo.config), "seed", |conn| {
            diesel::sql_query(
                "INSERT INTO users (name, email) VALUES (' ', 'legacy@x.com'), ('Ann', 'ann@x.com')",
            )
            .execute(conn)
            .map_err(map_diesel_error)
        })
        .await
        .expect("seed rows");

        let users = repo.list().await.expect("list succeeds");
        assert_eq!(users.len(), 2);
        let blank = users.first().expect("first row");
        assert_eq!(blank.name().as_ref(), " ");
        assert_eq!(blank.email().as_ref(), "legacy@x.com");

        let ann = repo
            .find_by_id(UserId::new(2))
            .await
            .expect("find succeeds")
            .expect("row exists");
        assert_eq!(ann.name().as_ref(), "Ann");
    }
}
