//! Shared fixtures for integration tests: an isolated SQLite file per test.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::path::PathBuf;

use tempfile::TempDir;
use users_service::domain::ports::UserRepository;
use users_service::outbound::persistence::{DieselUserRepository, SqliteStoreConfig};

/// Repository over a fresh database file, kept alive with its directory.
pub struct TempStore {
    pub repository: DieselUserRepository,
    pub database_path: PathBuf,
    _dir: TempDir,
}

impl TempStore {
    /// Create a repository whose database lives in a nested, not yet
    /// existing directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let database_path = dir.path().join("database").join("CRUD.db");
        let config = SqliteStoreConfig::new(database_path.clone());
        Self {
            repository: DieselUserRepository::new(config),
            database_path,
            _dir: dir,
        }
    }

    /// Create the store and its schema.
    pub async fn initialized() -> Self {
        let store = Self::new();
        store
            .repository
            .initialize()
            .await
            .expect("schema initialisation succeeds");
        store
    }
}
