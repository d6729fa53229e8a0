//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every user, exercise and health endpoint together with
//! the request/response bodies and the error envelope schemas. Swagger UI
//! serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::exercises::{
    AddExerciseRequestBody, ExerciseResponse, LogEntryResponse, LogResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserRequest, UserResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Exercise tracker API",
        description = "Create users, log exercises and read filtered exercise logs."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::exercises::add_exercise,
        crate::inbound::http::exercises::get_log,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        UserResponse,
        AddExerciseRequestBody,
        ExerciseResponse,
        LogEntryResponse,
        LogResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "users", description = "User registration and listing"),
        (name = "exercises", description = "Exercise logging and exercise logs"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
