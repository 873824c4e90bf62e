use reelvault_core::{AppError, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

/// Create a connection pool from configuration.
pub async fn create_pool(config: &Config) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .connect(config.database_url())
        .await?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        "Database pool created"
    );

    Ok(pool)
}
