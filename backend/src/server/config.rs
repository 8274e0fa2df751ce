//! Server settings loaded via OrthoConfig and the typed configuration built
//! from them.

use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use users_service::outbound::persistence::{DEFAULT_DATABASE_PATH, SqliteStoreConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Raw settings from CLI flags and `USERS_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USERS")]
pub struct ServerSettings {
    /// Socket address the HTTP listener binds to.
    #[ortho_config(default = String::from(DEFAULT_BIND_ADDR))]
    pub bind_addr: String,
    /// SQLite database file; its directory is created on start-up.
    #[ortho_config(default = PathBuf::from(DEFAULT_DATABASE_PATH))]
    pub database_path: PathBuf,
    /// Milliseconds a connection waits on a locked database.
    #[ortho_config(default = 5000)]
    pub busy_timeout_ms: u64,
}

/// Errors raised while turning [`ServerSettings`] into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Typed configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: SqliteStoreConfig,
}

impl ServerConfig {
    /// Construct a server configuration from already-parsed parts.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: SqliteStoreConfig) -> Self {
        Self { bind_addr, store }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the SQLite store configuration.
    #[must_use]
    pub fn store(&self) -> &SqliteStoreConfig {
        &self.store
    }
}

impl TryFrom<ServerSettings> for ServerConfig {
    type Error = ConfigError;

    fn try_from(settings: ServerSettings) -> Result<Self, Self::Error> {
        let ServerSettings {
            bind_addr,
            database_path,
            busy_timeout_ms,
        } = settings;
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr,
                source,
            })?;
        let store = SqliteStoreConfig::new(database_path)
            .with_busy_timeout(Duration::from_millis(busy_timeout_ms));
        Ok(Self::new(bind_addr, store))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;
    use std::path::Path;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("users-service")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env([
            ("USERS_BIND_ADDR", None::<String>),
            ("USERS_DATABASE_PATH", None::<String>),
            ("USERS_BUSY_TIMEOUT_MS", None::<String>),
        ]);

        let config = ServerConfig::try_from(load_from_empty_args()).expect("valid defaults");
        assert_eq!(config.bind_addr(), "127.0.0.1:5000".parse().expect("addr"));
        assert_eq!(config.store().database_path(), Path::new("database/CRUD.db"));
        assert_eq!(config.store().busy_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("USERS_BIND_ADDR", Some("0.0.0.0:8080".to_owned())),
            ("USERS_DATABASE_PATH", Some("/tmp/users/test.db".to_owned())),
            ("USERS_BUSY_TIMEOUT_MS", Some("250".to_owned())),
        ]);

        let config = ServerConfig::try_from(load_from_empty_args()).expect("valid overrides");
        assert_eq!(config.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.store().database_path(), Path::new("/tmp/users/test.db"));
        assert_eq!(config.store().busy_timeout(), Duration::from_millis(250));
    }

    #[rstest]
    fn unparsable_bind_address_is_rejected() {
        let settings = ServerSettings {
            bind_addr: "localhost".to_owned(),
            database_path: PathBuf::from("users.db"),
            busy_timeout_ms: 5000,
        };

        let err = ServerConfig::try_from(settings).expect_err("hostname is not a socket address");
        assert!(matches!(err, ConfigError::InvalidBindAddr { ref value, .. } if value == "localhost"));
    }
}
