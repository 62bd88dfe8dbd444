//! Database connection pool construction
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is the only
//! source of connections in this crate; everything downstream borrows a
//! connection per operation and hands it back on drop.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use admission_core::DatabaseConfig;

/// Default maximum connections for the pool.
/// Kept low; one admission service per database.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default wait for a free connection before acquisition fails.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Create a PostgreSQL connection pool with default limits.
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS, DEFAULT_ACQUIRE_TIMEOUT).await
}

/// Create a PostgreSQL connection pool with custom limits.
///
/// `acquire_timeout` bounds how long a caller blocks waiting for a free
/// connection; a pool that has leaked connections surfaces here.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Create a pool from the loaded application config.
pub async fn create_pool_from_config(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(
        &config.url,
        config.max_connections(),
        Duration::from_secs(config.acquire_timeout_secs()),
    )
    .await
}
