//! Integration tests for the Diesel user and exercise repositories.
//!
//! Each test clones a freshly migrated template database on the shared
//! embedded cluster. Async calls run on a runtime owned by the test context
//! so the fixtures stay synchronous.

use chrono::NaiveDate;
use exercise_tracker::domain::ports::{
    ExerciseRepository, ExerciseRepositoryError, UserRepository,
};
use exercise_tracker::domain::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseFilter, NewExercise, User,
    UserId, Username,
};
use exercise_tracker::outbound::persistence::{
    DbPool, DieselExerciseRepository, DieselUserRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::shared_cluster;
use support::embedded_postgres::drop_exercises_table;
use support::{handle_cluster_setup_failure, provision_template_database};

struct TestContext {
    runtime: Runtime,
    users: DieselUserRepository,
    exercises: DieselExerciseRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn create_user(&self, name: &str) -> User {
        let username = Username::new(name).expect("valid username");
        self.runtime
            .block_on(self.users.create(&username))
            .expect("user insert succeeds")
    }

    fn add_exercise(&self, user: &User, description: &str, minutes: u32, date: &str) -> Exercise {
        let exercise = NewExercise {
            user_id: user.id().clone(),
            description: Description::new(description).expect("valid description"),
            duration: DurationMinutes::new(minutes).expect("valid duration"),
            date: date_of(date),
        };
        self.runtime
            .block_on(self.exercises.create(&exercise))
            .expect("exercise insert succeeds")
    }

    fn find(&self, filter: &ExerciseFilter) -> Result<Vec<Exercise>, ExerciseRepositoryError> {
        self.runtime.block_on(self.exercises.find(filter))
    }
}

fn date_of(raw: &str) -> ExerciseDate {
    ExerciseDate::new(NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("fixture date"))
}

fn descriptions(entries: &[Exercise]) -> Vec<&str> {
    entries
        .iter()
        .map(|exercise| exercise.description().as_ref())
        .collect()
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_template_database(cluster)?;
    let database_url = database.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        users: DieselUserRepository::new(pool.clone()),
        exercises: DieselExerciseRepository::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn users_round_trip_in_creation_order(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let alice = ctx.create_user("alice");
    let bob = ctx.create_user("bob");
    let twin = ctx.create_user("alice");

    assert_ne!(alice.id(), twin.id(), "usernames are not unique keys");
    let listed = ctx.runtime.block_on(ctx.users.list()).expect("list succeeds");
    assert_eq!(listed, vec![alice.clone(), bob, twin]);

    let found = ctx
        .runtime
        .block_on(ctx.users.find_by_id(alice.id()))
        .expect("lookup succeeds");
    assert_eq!(found, Some(alice));
}

#[rstest]
fn unknown_user_is_absent(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };

    let found = ctx
        .runtime
        .block_on(ctx.users.find_by_id(&UserId::random()))
        .expect("lookup succeeds");
    assert_eq!(found, None);
}

#[rstest]
fn created_exercise_keeps_its_fields(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };
    let user = ctx.create_user("runner");

    let stored = ctx.add_exercise(&user, "tempo run", 42, "2023-01-01");

    assert_eq!(stored.user_id(), user.id());
    assert_eq!(stored.description().as_ref(), "tempo run");
    assert_eq!(stored.duration().get(), 42);
    assert_eq!(stored.date().to_string(), "Sun Jan 01 2023");
}

#[rstest]
fn log_is_scoped_to_the_user_in_insertion_order(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };
    let runner = ctx.create_user("runner");
    let other = ctx.create_user("other");
    ctx.add_exercise(&runner, "late", 10, "2023-03-01");
    ctx.add_exercise(&other, "someone else", 5, "2023-02-01");
    ctx.add_exercise(&runner, "early", 20, "2023-01-01");

    let entries = ctx
        .find(&ExerciseFilter::for_user(runner.id().clone()))
        .expect("find succeeds");

    assert_eq!(descriptions(&entries), vec!["late", "early"]);
}

#[rstest]
#[case(Some("2023-01-02"), None, None, vec!["b", "c"])]
#[case(None, Some("2023-01-02"), None, vec!["a", "b"])]
#[case(Some("2023-01-02"), Some("2023-01-02"), None, vec!["b"])]
#[case(None, None, Some(2), vec!["a", "b"])]
#[case(Some("2023-01-02"), None, Some(1), vec!["b"])]
fn log_applies_inclusive_bounds_and_limit(
    context: Option<TestContext>,
    #[case] from: Option<&str>,
    #[case] to: Option<&str>,
    #[case] limit: Option<u32>,
    #[case] expected: Vec<&str>,
) {
    let Some(ctx) = context else {
        return;
    };
    let user = ctx.create_user("runner");
    ctx.add_exercise(&user, "a", 10, "2023-01-01");
    ctx.add_exercise(&user, "b", 10, "2023-01-02");
    ctx.add_exercise(&user, "c", 10, "2023-01-03");

    let mut filter = ExerciseFilter::for_user(user.id().clone());
    if let Some(from) = from {
        filter = filter.with_from(date_of(from));
    }
    if let Some(to) = to {
        filter = filter.with_to(date_of(to));
    }
    if let Some(limit) = limit {
        filter = filter.with_limit(limit);
    }

    let entries = ctx.find(&filter).expect("find succeeds");
    assert_eq!(descriptions(&entries), expected);
}

#[rstest]
fn missing_table_surfaces_as_query_error(context: Option<TestContext>) {
    let Some(ctx) = context else {
        return;
    };
    let user = ctx.create_user("runner");
    drop_exercises_table(&ctx.database_url).expect("drop succeeds");

    let error = ctx
        .find(&ExerciseFilter::for_user(user.id().clone()))
        .expect_err("table is gone");

    assert!(
        matches!(error, ExerciseRepositoryError::Query { .. }),
        "expected query error, got {error:?}"
    );
}
