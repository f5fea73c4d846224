//! Shared test helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use mockable::DefaultClock;
use rstest::fixture;
use tasklink::relationship::adapters::postgres::PostgresRelationshipRepository;
use tasklink::task::{
    adapters::postgres::{PostgresTaskRepository, TaskPgPool},
    domain::{Integration, NewTask, Task, TaskStatus},
};
use uuid::Uuid;

/// Boxed error type used by fallible helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the database used by these tests.
pub const DATABASE_URL_ENV: &str = "TASKLINK_TEST_DATABASE_URL";

/// SQL that creates the task and relationship tables.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_tasks_and_relationships/up.sql");

/// Provides a [`DefaultClock`] for test fixtures.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Pins every pooled connection to one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", quote_identifier(&self.0)))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Schema created for a single test and dropped with it.
pub struct TemporarySchema {
    url: String,
    name: String,
}

impl Drop for TemporarySchema {
    fn drop(&mut self) {
        if let Ok(mut connection) = PgConnection::establish(&self.url) {
            drop(connection.batch_execute(&format!(
                "DROP SCHEMA IF EXISTS {} CASCADE",
                quote_identifier(&self.name)
            )));
        }
    }
}

/// Repositories bound to a freshly migrated temporary schema.
pub struct PreparedRepos {
    /// Task repository.
    pub tasks: PostgresTaskRepository,
    /// Relationship repository sharing the task pool.
    pub relationships: PostgresRelationshipRepository,
    /// Schema guard; dropping it removes the test data.
    pub schema: TemporarySchema,
}

/// Creates a migrated temporary schema and repositories over it.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migration fails.
pub async fn prepare() -> Result<Option<PreparedRepos>, BoxError> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        return Ok(None);
    };
    let name = format!("tasklink_test_{}", Uuid::new_v4().simple());

    let schema_url = url.clone();
    let schema_name = name.clone();
    tokio::task::spawn_blocking(move || create_schema(&schema_url, &schema_name)).await??;
    let schema = TemporarySchema {
        url: url.clone(),
        name: name.clone(),
    };

    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool: TaskPgPool = tokio::task::spawn_blocking(move || {
        Pool::builder()
            .max_size(2)
            .connection_customizer(Box::new(SearchPath(name)))
            .build(manager)
    })
    .await??;

    Ok(Some(PreparedRepos {
        tasks: PostgresTaskRepository::new(pool.clone()),
        relationships: PostgresRelationshipRepository::new(pool),
        schema,
    }))
}

fn create_schema(url: &str, name: &str) -> Result<(), BoxError> {
    let mut connection = PgConnection::establish(url)?;
    let quoted = quote_identifier(name);
    connection.batch_execute(&format!("CREATE SCHEMA {quoted}; SET search_path TO {quoted};"))?;
    connection.batch_execute(CREATE_SCHEMA_SQL)?;
    Ok(())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builds a task with the given title and status.
///
/// # Errors
///
/// Returns an error if the title or status is blank.
pub fn build_task(clock: &DefaultClock, title: &str, status: &str) -> Result<Task, BoxError> {
    Ok(Task::new(
        NewTask {
            title: title.to_owned(),
            status: TaskStatus::new(status)?,
            integration: Integration::GitHub,
            description: Some(format!("{title} imported for testing")),
            priority: Some("medium".to_owned()),
        },
        clock,
    )?)
}
