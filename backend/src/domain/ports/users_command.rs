//! Driving port for user mutations.
//!
//! HTTP handlers call this port; the domain service implements it on top of
//! the `UserRepository` and classifies persistence failures.

use async_trait::async_trait;

use crate::domain::{Error, UserDraft, UserId};

/// Domain use-case port for creating, updating, and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user, returning its new identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error>;

    /// Overwrite a user's name and email; succeeds when `id` is absent.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error>;

    /// Delete a user; succeeds when `id` is absent.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
