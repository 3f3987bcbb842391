// src/db.rs
use crate::error::AppResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub async fn create_db_pool(database_url: &str) -> AppResult<SqlitePool> {
    tracing::info!("Connecting to database: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Runs the SQL files under ./migrations.
pub async fn run_migrations(pool: &SqlitePool) -> AppResult<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations complete.");
    Ok(())
}

/// Single-connection in-memory database; every extra connection would see an empty database.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:").expect("valid sqlite url");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("in-memory sqlite pool");
    run_migrations(&pool).await.expect("migrations apply");
    pool
}
