//! OpenAPI documentation for the users service.
//!
//! [`ApiDoc`] collects every HTTP path from the inbound layer together with
//! the request and response schemas. Swagger UI serves it in debug builds and
//! the `openapi-dump` binary prints it for external tooling.

use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::users::{CreatedResponse, MessageResponse, UserPayload};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users service API",
        description = "CRUD operations over users stored in an embedded SQLite file."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::diagnostics::greeting,
        crate::inbound::http::diagnostics::total_changes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserPayload,
        CreatedResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "users", description = "User records"),
        (name = "diagnostics", description = "Greeting page and store counters"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
