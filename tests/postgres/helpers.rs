//! Shared test helpers for `PostgreSQL` integration tests.

use charity_hub::db::{self, PgPool};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use rstest::fixture;
use uuid::Uuid;

/// Boxed error type for fallible test setup.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test server.
pub const TEST_DATABASE_URL_ENV: &str = "CHARITY_HUB_TEST_DATABASE_URL";

/// Points every pooled connection at one schema.
#[derive(Debug)]
struct SearchPath(String);

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SearchPath {
    fn on_acquire(&self, connection: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("SET search_path TO {}", self.0))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Schema-isolated database handle, dropped with the test.
pub struct IsolatedSchema {
    url: String,
    schema: String,
    pool: PgPool,
}

impl IsolatedSchema {
    /// Returns a pool whose connections resolve tables in this schema.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

impl Drop for IsolatedSchema {
    fn drop(&mut self) {
        let statement = format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema);
        let url = self.url.clone();
        // Drop runs inside the test runtime, so leave it for a plain thread.
        let cleanup = std::thread::spawn(move || {
            PgConnection::establish(&url)
                .map_err(BoxError::from)
                .and_then(|mut connection| Ok(connection.batch_execute(&statement)?))
        });
        drop(cleanup.join());
    }
}

/// Creates a fresh schema with every table applied.
///
/// Returns `Ok(None)` when no test database is configured.
///
/// # Errors
///
/// Returns an error when the server rejects the connection or the schema.
#[fixture]
pub async fn isolated_schema() -> Result<Option<IsolatedSchema>, BoxError> {
    let Ok(url) = std::env::var(TEST_DATABASE_URL_ENV) else {
        return Ok(None);
    };
    tokio::task::spawn_blocking(move || create_schema(url).map(Some)).await?
}

fn create_schema(url: String) -> Result<IsolatedSchema, BoxError> {
    let schema = format!("charity_test_{}", Uuid::new_v4().simple());
    let mut connection = PgConnection::establish(&url)?;
    connection.batch_execute(&format!("CREATE SCHEMA {schema}"))?;
    connection.batch_execute(&format!("SET search_path TO {schema}"))?;
    db::apply_schema(&mut connection)?;

    let pool = Pool::builder()
        .max_size(4)
        .connection_customizer(Box::new(SearchPath(schema.clone())))
        .build(ConnectionManager::<PgConnection>::new(url.as_str()))?;
    Ok(IsolatedSchema { url, schema, pool })
}
