//! Exercise and exercise-log HTTP handlers.
//!
//! ```text
//! POST /api/users/{id}/exercises
//! GET  /api/users/{id}/logs?from&to&limit
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{AddExerciseRequest, GetExerciseLogRequest};
use crate::domain::{Exercise, ExerciseDraft, ExerciseLog, LogQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::UserResponse;
use crate::inbound::http::validation::parse_user_id;

/// Duration as submitted: JSON number or text.
///
/// Numbers are normalised to their textual form so one coercion rule applies
/// to JSON and form bodies alike.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DurationInput {
    fn into_text(self) -> String {
        match self {
            Self::Integer(value) => value.to_string(),
            Self::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                format!("{value:.0}")
            }
            Self::Float(value) => value.to_string(),
            Self::Text(value) => value,
        }
    }
}

/// Body accepted by `POST /api/users/{id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddExerciseRequestBody {
    #[serde(default)]
    #[schema(example = "run")]
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "30")]
    pub duration: Option<DurationInput>,
    #[serde(default)]
    #[schema(example = "2023-01-01")]
    pub date: Option<String>,
}

impl From<AddExerciseRequestBody> for ExerciseDraft {
    fn from(body: AddExerciseRequestBody) -> Self {
        Self {
            description: body.description,
            duration: body.duration.map(DurationInput::into_text),
            date: body.date,
        }
    }
}

/// Exercise document returned after logging an exercise.
///
/// `id` and `username` describe the owning user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ExerciseResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: u32,
    #[schema(example = "Sun Jan 01 2023")]
    pub date: String,
}

/// Single entry of an exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LogEntryResponse {
    pub description: String,
    pub duration: u32,
    #[schema(example = "Sun Jan 01 2023")]
    pub date: String,
}

impl From<&Exercise> for LogEntryResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description().to_string(),
            duration: exercise.duration().get(),
            date: exercise.date().to_string(),
        }
    }
}

/// Exercise log document; `count` always equals `log.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LogResponse {
    #[schema(format = "uuid")]
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntryResponse>,
}

impl From<ExerciseLog> for LogResponse {
    fn from(log: ExerciseLog) -> Self {
        let (user, entries) = log.into_parts();
        let UserResponse { id, username } = UserResponse::from(&user);
        let log: Vec<LogEntryResponse> = entries.iter().map(LogEntryResponse::from).collect();
        Self {
            id,
            username,
            count: log.len(),
            log,
        }
    }
}

/// Query parameters accepted by the log endpoint.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQueryParams {
    /// Inclusive lower date bound.
    #[param(example = "2023-01-01")]
    pub from: Option<String>,
    /// Inclusive upper date bound.
    #[param(example = "2023-12-31")]
    pub to: Option<String>,
    /// Maximum number of entries.
    #[param(example = "10")]
    pub limit: Option<String>,
}

impl From<LogQueryParams> for LogQuery {
    fn from(params: LogQueryParams) -> Self {
        Self {
            from: params.from,
            to: params.to,
            limit: params.limit,
        }
    }
}

type ExercisePayload =
    web::Either<web::Json<AddExerciseRequestBody>, web::Form<AddExerciseRequestBody>>;

/// Log an exercise for a user.
///
/// The user is resolved before the body is validated; an unknown or
/// malformed id yields 404 and nothing is stored. A missing or blank `date`
/// defaults to the current UTC day.
#[utoipa::path(
    post,
    path = "/api/users/{id}/exercises",
    params(("id" = String, Path, description = "User identifier")),
    request_body = AddExerciseRequestBody,
    responses(
        (status = 200, description = "Exercise logged", body = ExerciseResponse),
        (status = 400, description = "Invalid exercise fields", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Persistence unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "addExercise"
)]
#[post("/users/{id}/exercises")]
pub async fn add_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: ExercisePayload,
) -> ApiResult<web::Json<ExerciseResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let draft = ExerciseDraft::from(payload.into_inner());

    let response = state
        .exercises
        .add_exercise(AddExerciseRequest { user_id, draft })
        .await?;

    let UserResponse { id, username } = UserResponse::from(&response.user);
    let LogEntryResponse {
        description,
        duration,
        date,
    } = LogEntryResponse::from(&response.exercise);
    Ok(web::Json(ExerciseResponse {
        id,
        username,
        description,
        duration,
        date,
    }))
}

/// Fetch a user's exercise log.
///
/// Entries are returned in insertion order, filtered by the inclusive
/// `from`/`to` bounds and capped by `limit`.
#[utoipa::path(
    get,
    path = "/api/users/{id}/logs",
    params(("id" = String, Path, description = "User identifier"), LogQueryParams),
    responses(
        (status = 200, description = "Exercise log", body = LogResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 503, description = "Persistence unavailable", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExerciseLog"
)]
#[get("/users/{id}/logs")]
pub async fn get_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQueryParams>,
) -> ApiResult<web::Json<LogResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;

    let log = state
        .exercise_log
        .get_log(GetExerciseLogRequest {
            user_id,
            query: LogQuery::from(query.into_inner()),
        })
        .await?;

    Ok(web::Json(LogResponse::from(log)))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
