//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Mutating use cases.
    pub users: Arc<dyn UsersCommand>,
    /// Reads and the write counter.
    pub users_query: Arc<dyn UsersQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use users_service::domain::UserService;
    /// use users_service::inbound::http::state::HttpState;
    /// use users_service::outbound::persistence::{DieselUserRepository, SqliteStoreConfig};
    ///
    /// let repository = DieselUserRepository::new(SqliteStoreConfig::default());
    /// let service = Arc::new(UserService::new(Arc::new(repository)));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.users_query.clone();
    /// ```
    pub fn new(users: Arc<dyn UsersCommand>, users_query: Arc<dyn UsersQuery>) -> Self {
        Self { users, users_query }
    }
}
