use anyhow::Context;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Creates the todo table if it doesn't already exist. Columns are left nullable so databases
/// written by older versions of the service can still be opened.
const CREATE_TODO_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS todos (id INTEGER PRIMARY KEY, task TEXT, completed INTEGER)";

/// Opens a connection pool to the SQLite database at [db_url], creating the database file if
/// needed, and makes sure the todo table exists before handing the pool back.
pub async fn connect_sqlx(db_url: &str) -> Result<SqlitePool, anyhow::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)
        .with_context(|| format!("parsing database URL {db_url}"))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(2))
        .connect_with(connect_options)
        .await
        .context("opening the database connection pool")?;

    ensure_schema(&pool).await?;
    info!("Connected to the SQLite database.");

    Ok(pool)
}

/// Runs the idempotent schema setup against the given pool
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), anyhow::Error> {
    sqlx::query(CREATE_TODO_TABLE)
        .execute(pool)
        .await
        .context("creating the todos table")?;

    Ok(())
}

/// Waits for checked-out connections to be returned, then closes every connection in the pool
pub async fn close(pool: SqlitePool) {
    pool.close().await;
    info!("Database connections closed.");
}
