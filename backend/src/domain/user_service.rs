//! User use-case service.
//!
//! Implements the driving ports over a [`UserRepository`]. This is the one
//! place where persistence failures are classified into domain errors: a
//! duplicate email becomes [`ErrorCode::EmailConflict`](crate::domain::ErrorCode),
//! everything else becomes an internal error whose detail stays in the logs.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// Client-facing message for a write rejected by the unique email index.
pub const EMAIL_CONFLICT_MESSAGE: &str = "User with this email already exists";
/// Client-facing message for a lookup of an unknown user.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Domain service backing the users HTTP endpoints.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(operation: &'static str, err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { message } => {
            warn!(%operation, %message, "email uniqueness constraint rejected write");
            Error::email_conflict(EMAIL_CONFLICT_MESSAGE)
        }
        UserPersistenceError::Connection { .. } | UserPersistenceError::Query { .. } => {
            error!(%operation, error = %err, "user persistence failed");
            Error::internal(format!("{operation} failed: {err}"))
        }
    }
}

#[async_trait]
impl UsersCommand for UserService {
    async fn create_user(&self, draft: UserDraft) -> Result<UserId, Error> {
        self.repository
            .create(&draft)
            .await
            .map_err(|err| map_persistence_error("create user", err))
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<(), Error> {
        self.repository
            .update(id, &draft)
            .await
            .map_err(|err| map_persistence_error("update user", err))
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| map_persistence_error("delete user", err))
    }
}

#[async_trait]
impl UsersQuery for UserService {
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error("get user", err))?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| map_persistence_error("list users", err))
    }

    async fn total_changes(&self) -> Result<u64, Error> {
        Ok(self.repository.total_changes())
    }
}

#[cfg(test)]
mod tests {
    //! Coverage for error classification and delegation.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> UserDraft {
        UserDraft::try_from_strings("Ann", "ann@x.com").expect("valid draft")
    }

    fn service(repository: MockUserRepository) -> UserService {
        UserService::new(Arc::new(repository))
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_assigned_id(draft: UserDraft) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .withf(|draft| draft.email().as_ref() == "ann@x.com")
            .times(1)
            .returning(|_| Ok(UserId::new(5)));

        let id = service(repository)
            .create_user(draft)
            .await
            .expect("create succeeds");
        assert_eq!(id, UserId::new(5));
    }

    #[rstest]
    #[case(UserPersistenceError::duplicate_email("UNIQUE constraint failed: users.email"), ErrorCode::EmailConflict)]
    #[case(UserPersistenceError::connection("unable to open database file"), ErrorCode::InternalError)]
    #[case(UserPersistenceError::query("database is locked"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn create_classifies_persistence_failures(
        draft: UserDraft,
        #[case] failure: UserPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_create()
            .return_once(move |_| Err(failure));

        let err = service(repository)
            .create_user(draft)
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_uses_client_message(draft: UserDraft) {
        let mut repository = MockUserRepository::new();
        repository
            .expect_update()
            .return_once(|_, _| Err(UserPersistenceError::duplicate_email("users.email")));

        let err = service(repository)
            .update_user(UserId::new(1), draft)
            .await
            .expect_err("conflict propagates");
        assert_eq!(err.code(), ErrorCode::EmailConflict);
        assert_eq!(err.message(), EMAIL_CONFLICT_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn get_user_maps_missing_row_to_not_found() {
        let mut repository = MockUserRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let err = service(repository)
            .get_user(UserId::new(99))
            .await
            .expect_err("missing user");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), USER_NOT_FOUND_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn get_user_returns_stored_user() {
        let stored = User::try_from_parts(3, "Ann", "ann@x.com").expect("valid user");
        let returned = stored.clone();
        let mut repository = MockUserRepository::new();
        repository
            .expect_find_by_id()
            .withf(|id| *id == UserId::new(3))
            .return_once(move |_| Ok(Some(returned)));

        let user = service(repository)
            .get_user(UserId::new(3))
            .await
            .expect("user present");
        assert_eq!(user, stored);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_failure_keeps_detail_out_of_code() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_delete()
            .return_once(|_| Err(UserPersistenceError::query("disk I/O error")));

        let err = service(repository)
            .delete_user(UserId::new(1))
            .await
            .expect_err("failure propagates");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("disk I/O error"));
    }

    #[rstest]
    #[tokio::test]
    async fn total_changes_reads_repository_counter() {
        let mut repository = MockUserRepository::new();
        repository.expect_total_changes().return_const(4_u64);

        let changes = service(repository)
            .total_changes()
            .await
            .expect("counter readable");
        assert_eq!(changes, 4);
    }
}
