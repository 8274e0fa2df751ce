//! Driving port for user reads and store diagnostics.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch a single user, failing with a not-found error when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Fetch every user in store order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Cumulative store writes since process start.
    async fn total_changes(&self) -> Result<u64, Error>;
}
