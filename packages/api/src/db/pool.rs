//! Database connection pool and migrations.

use std::time::Duration;

use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::settings::Database;

/// Open a connection pool using the configured URL and pool size.
pub async fn connect(settings: &Database) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections = settings.connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(settings.connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(settings.url())
        .await
}

/// Apply any pending schema migrations.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
