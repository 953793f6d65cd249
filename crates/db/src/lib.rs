//! Persistence for villa records.
//!
//! - [`models`]: the `villas` row and its wire DTOs
//! - [`mapping`]: conversions between rows and DTOs
//! - [`store`]: the [`store::VillaStore`] contract shared by both backends
//! - [`repositories`]: the PostgreSQL and in-memory backends

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod mapping;
pub mod models;
pub mod repositories;
pub mod store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
