//! User HTTP handlers.
//!
//! ```text
//! POST /api/users
//! GET  /api/users
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{User, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{USERNAME, missing_field_error, username_error};

/// Body accepted by `POST /api/users`, as JSON or form fields.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: Option<String>,
}

/// User document returned by the user endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(format = "uuid", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "alice")]
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

type UserPayload = web::Either<web::Json<CreateUserRequest>, web::Form<CreateUserRequest>>;

/// Register a user.
///
/// Usernames are trimmed and need not be unique; each call stores a new user.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Missing or invalid username", body = ErrorSchema),
        (status = 503, description = "Persistence unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: UserPayload,
) -> ApiResult<web::Json<UserResponse>> {
    let raw = payload
        .into_inner()
        .username
        .ok_or_else(|| missing_field_error(USERNAME))?;
    let username = Username::new(&raw).map_err(|err| username_error(&err, &raw))?;

    let user = state.users_command.create_user(username).await?;
    Ok(web::Json(UserResponse::from(&user)))
}

/// List every user in creation order.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 503, description = "Persistence unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users_query.list_users().await?;
    Ok(web::Json(users.iter().map(UserResponse::from).collect()))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
