//! Users API handlers.
//!
//! ```text
//! POST   /users        {"name":"Ann","email":"ann@x.com"}
//! GET    /users
//! GET    /users/{id}
//! PUT    /users/{id}   {"name":"Anna","email":"ann@x.com"}
//! DELETE /users/{id}
//! ```

use actix_web::error::JsonPayloadError;
use actix_web::{HttpResponse, delete, get, http::header, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{Error, USER_NOT_FOUND_MESSAGE, User, UserDraft, UserId, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

/// Message returned when a request body is not a JSON object.
pub const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object";

/// Request body for create and update.
///
/// Both fields are optional at the parsing stage so a missing field is
/// reported with the same message as an empty one.
///
/// Example JSON: `{"name":"Ann","email":"ann@x.com"}`
#[derive(Debug, Default, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(expecting = "a JSON object")]
pub struct UserPayload {
    /// Required; blank values are rejected.
    #[schema(example = "Ann")]
    pub name: Option<String>,
    /// Required and unique across users.
    #[schema(example = "ann@x.com")]
    pub email: Option<String>,
}

impl TryFrom<UserPayload> for UserDraft {
    type Error = UserValidationError;

    fn try_from(value: UserPayload) -> Result<Self, Self::Error> {
        Self::try_from_strings(
            value.name.unwrap_or_default(),
            value.email.unwrap_or_default(),
        )
    }
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyName => Error::invalid_request("name is required"),
        UserValidationError::EmptyEmail => Error::invalid_request("email is required"),
    }
}

/// Confirmation body returned by update and delete.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Confirmation text.
    #[schema(example = "User updated successfully")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Confirmation body returned by create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    /// Confirmation text.
    #[schema(example = "User created successfully")]
    pub message: String,
    /// Identifier assigned by the store.
    #[schema(example = 1)]
    pub id: i64,
}

/// JSON extractor settings shared by the users routes.
///
/// Well-formed JSON of the wrong shape, such as a number where a string is
/// expected, is reported with the decoder's description. Anything else that
/// cannot be read, including a wrong content type, gets
/// [`INVALID_BODY_MESSAGE`]. Both are 400s with the standard error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        let message = match &err {
            JsonPayloadError::Deserialize(source) if source.is_data() => {
                format!("Invalid request body: {source}")
            }
            _ => INVALID_BODY_MESSAGE.to_owned(),
        };
        Error::invalid_request(message).into()
    })
}

/// Path extractor settings: an `{id}` that is not an integer names no user.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected user id segment");
        Error::not_found(USER_NOT_FOUND_MESSAGE).into()
    })
}

/// Register the users routes and their extractor settings.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_service::inbound::http::users;
///
/// let _app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(create_user)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = CreatedResponse,
            headers(("Location" = String, description = "Path of the new user"))),
        (status = 400, description = "Missing field, malformed body, or duplicate email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    let id = state.users.create_user(draft).await?;
    info!(user_id = %id, "user created");
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{id}")))
        .json(CreatedResponse {
            message: "User created successfully".to_owned(),
            id: id.get(),
        }))
}

/// List every user in store order.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserSchema]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserSchema),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .get_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Overwrite a user's name and email.
///
/// Succeeds even when no user has the given id.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Update applied", body = MessageResponse),
        (status = 400, description = "Missing field, malformed body, or duplicate email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = UserId::new(path.into_inner());
    let draft = UserDraft::try_from(payload.into_inner()).map_err(map_user_validation_error)?;
    state.users.update_user(id, draft).await?;
    Ok(web::Json(MessageResponse::new("User updated successfully")))
}

/// Delete a user.
///
/// Succeeds even when no user has the given id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Delete applied", body = MessageResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .users
        .delete_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}
