//! SQLite persistence adapters using Diesel ORM.
//!
//! # Architecture
//!
//! - **Connection per operation**: every repository call opens its own
//!   `SqliteConnection` on Tokio's blocking pool and drops it before
//!   returning. There is no pool and no cross-call transaction.
//! - **Internal models**: Diesel row structs (`models.rs`) and the table
//!   definition (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and connection errors are mapped to
//!   [`UserPersistenceError`](crate::domain::ports::UserPersistenceError).
//!
//! # Example
//!
//! ```no_run
//! use users_service::domain::ports::UserRepository;
//! use users_service::outbound::persistence::{DieselUserRepository, SqliteStoreConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = DieselUserRepository::new(SqliteStoreConfig::new("database/CRUD.db"));
//! repo.initialize().await?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod diesel_user_repository;
mod error_mapping;
mod models;
mod schema;

pub use connection::{DEFAULT_BUSY_TIMEOUT, DEFAULT_DATABASE_PATH, SqliteStoreConfig};
pub use diesel_user_repository::DieselUserRepository;
