//! Builders for HTTP state from the persistence adapter.

use std::sync::Arc;

use actix_web::web;

use users_service::domain::UserService;
use users_service::domain::ports::UserRepository;
use users_service::inbound::http::state::HttpState;

/// Wrap the repository in the user service and expose it through both
/// driving ports.
pub fn build_http_state(repository: Arc<dyn UserRepository>) -> web::Data<HttpState> {
    let service = Arc::new(UserService::new(repository));
    web::Data::new(HttpState::new(service.clone(), service))
}
