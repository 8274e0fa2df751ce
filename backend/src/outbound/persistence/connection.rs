//! Connection-per-operation access to the SQLite database file.
//!
//! Every repository call runs on Tokio's blocking pool, opens its own
//! `SqliteConnection`, and drops it when the closure returns or unwinds.
//! Statements run in SQLite's autocommit mode, so each mutation is durable
//! as soon as the call returns.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::error_mapping::{map_connection_error, map_diesel_error};

/// Default location of the database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "database/CRUD.db";

/// Default time a connection waits on a locked database before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for the SQLite store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use users_service::outbound::persistence::SqliteStoreConfig;
///
/// let config = SqliteStoreConfig::new("/var/lib/users/users.db")
///     .with_busy_timeout(Duration::from_millis(250));
/// assert_eq!(config.busy_timeout(), Duration::from_millis(250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteStoreConfig {
    database_path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStoreConfig {
    /// Create a configuration for the given database file.
    ///
    /// The busy timeout defaults to five seconds.
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }

    /// Set how long a connection waits for a competing writer.
    #[must_use]
    pub const fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Path of the database file.
    #[must_use]
    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Busy timeout applied to every connection.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        self.busy_timeout
    }
}

impl Default for SqliteStoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATABASE_PATH)
    }
}

/// Create the directory holding the database file when it is missing.
pub(super) fn ensure_parent_dir(config: &SqliteStoreConfig) -> Result<(), UserPersistenceError> {
    match config.database_path().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|err| {
                UserPersistenceError::connection(format!(
                    "cannot create database directory {}: {err}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

/// Open a connection and apply per-connection settings.
fn establish(config: &SqliteStoreConfig) -> Result<SqliteConnection, UserPersistenceError> {
    let path = config.database_path().to_string_lossy();
    debug!(database = %path, "opening sqlite connection");
    let mut conn =
        SqliteConnection::establish(&path).map_err(|err| map_connection_error(&err))?;
    diesel::sql_query(format!(
        "PRAGMA busy_timeout = {}",
        config.busy_timeout().as_millis()
    ))
    .execute(&mut conn)
    .map_err(map_diesel_error)?;
    Ok(conn)
}

/// Run `operation` against a fresh connection on the blocking pool.
///
/// The connection is owned by the blocking task and released on every exit
/// path. A panic inside `operation` surfaces as a query error.
pub(super) async fn with_connection<T, F>(
    config: Arc<SqliteStoreConfig>,
    label: &'static str,
    operation: F,
) -> Result<T, UserPersistenceError>
where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, UserPersistenceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = establish(&config)?;
        operation(&mut conn)
    })
    .await
    .map_err(|err| UserPersistenceError::query(format!("{label} aborted: {err}")))?
}
