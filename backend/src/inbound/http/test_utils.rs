//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{TimeZone, Utc};
use mockable::{Clock, MockClock};

use crate::Trace;
use crate::domain::{ExerciseService, UserService};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{InMemoryExerciseRepository, InMemoryUserRepository};

/// Clock pinned to 2024-03-15T12:00:00Z so default dates are predictable.
pub fn fixed_clock() -> Arc<dyn Clock> {
    let now = Utc
        .with_ymd_and_hms(2024, 3, 15, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    Arc::new(clock)
}

/// HTTP state wired to fresh in-memory repositories.
pub fn in_memory_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    let exercises = Arc::new(ExerciseService::new(
        users.clone(),
        Arc::new(InMemoryExerciseRepository::new()),
        fixed_clock(),
    ));
    let user_service = Arc::new(UserService::new(users));
    HttpState::new(HttpStatePorts {
        users_command: user_service.clone(),
        users_query: user_service,
        exercises: exercises.clone(),
        exercise_log: exercises,
    })
}

/// App serving the API scope over `state`, wrapped in the trace middleware.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}
