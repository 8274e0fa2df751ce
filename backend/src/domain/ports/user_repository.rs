//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The store could not be opened or the connection was lost.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email uniqueness constraint rejected the write.
        DuplicateEmail { message: String } => "user repository rejected duplicate email: {message}",
    }
}

/// Driven port for the user table.
///
/// Every call is independent: adapters acquire and release their own
/// connection and never hold a transaction open across calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Ensure the backing schema exists. Safe to call on every start.
    async fn initialize(&self) -> Result<(), UserPersistenceError>;

    /// Insert a new user and return the store-assigned identifier.
    async fn create(&self, draft: &UserDraft) -> Result<UserId, UserPersistenceError>;

    /// Fetch a user by identifier; `Ok(None)` when no row matches.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch every user in store order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Overwrite name and email. Zero matching rows is not an error.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<(), UserPersistenceError>;

    /// Remove a user. Zero matching rows is not an error.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;

    /// Rows written through this repository since it was constructed.
    fn total_changes(&self) -> u64;
}
