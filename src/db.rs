//! Shared `PostgreSQL` connection plumbing.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

/// `PostgreSQL` connection pool shared by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent schema creating every table the adapters expect.
pub const SCHEMA_SQL: &str =
    include_str!("../migrations/2026-10-01-000000_create_charity_tables/up.sql");

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size).build(manager)
}

/// Applies [`SCHEMA_SQL`] on the given connection.
///
/// # Errors
///
/// Returns the underlying diesel error when a statement fails.
pub fn apply_schema(connection: &mut PgConnection) -> diesel::QueryResult<()> {
    connection.batch_execute(SCHEMA_SQL)
}
