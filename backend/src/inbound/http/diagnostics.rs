//! Plain-text ancillary routes: the greeting page and the write counter.

use actix_web::{HttpResponse, get, http::header::ContentType, web};
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;

/// Environment variable inspected by the greeting route.
pub const SECRET_ENV_VAR: &str = "MY_SECRET";

/// Greeting page.
///
/// Logs whether `MY_SECRET` is present; the value itself is never logged or
/// returned.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = String, content_type = "text/html")),
    tags = ["diagnostics"],
    operation_id = "greeting"
)]
#[get("/")]
pub async fn greeting() -> HttpResponse {
    let secret_configured = std::env::var_os(SECRET_ENV_VAR).is_some();
    info!(secret_configured, "greeting requested");
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body("<p>Hello, World!</p>")
}

/// Rows written by the store since process start.
#[utoipa::path(
    get,
    path = "/total_changes",
    responses(
        (status = 200, description = "Write counter", body = String, content_type = "text/plain"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["diagnostics"],
    operation_id = "totalChanges"
)]
#[get("/total_changes")]
pub async fn total_changes(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let changes = state.users_query.total_changes().await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("Total changes in the database: {changes}")))
}

/// Register the diagnostic routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(greeting).service(total_changes);
}
