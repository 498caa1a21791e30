use anyhow::Result;
use rollcall_db::migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{ConnectOptions, SqlitePool};
use sqlx_migrator::{Migrate, Plan};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::config::DatabaseConfig;

/// Connection settings shared by every pool
///
/// - busy_timeout makes a blocked connection wait instead of failing fast
/// - foreign_keys must be enabled per connection (disabled by default)
fn connect_options(config: &DatabaseConfig) -> Result<SqliteConnectOptions> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .foreign_keys(true)
        .log_statements(LevelFilter::Debug);

    Ok(options)
}

/// WAL lets readers proceed while the single writer commits. Only writable
/// connections may switch the journal mode.
fn writable_options(config: &DatabaseConfig) -> Result<SqliteConnectOptions> {
    Ok(connect_options(config)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal))
}

/// Create a read-only connection pool for concurrent reads
pub async fn create_read_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = connect_options(config)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!(
        "Created read-only pool with {} max connections",
        config.max_connections
    );

    Ok(pool)
}

/// Create the read-write pool
///
/// Limited to 1 connection: every write and transaction is serialized through it.
pub async fn create_write_pool(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = writable_options(config)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!("Created read-write pool with 1 max connection");

    Ok(pool)
}

/// Create a standard pool without read/write separation, for CLI commands.
pub async fn create_pool(config: &DatabaseConfig, max_connections: u32) -> Result<SqlitePool> {
    let options = writable_options(config)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .connect_with(options)
        .await?;

    tracing::info!("Created pool with {} max connections", max_connections);

    Ok(pool)
}

/// Apply every pending schema migration.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let mut conn = pool.acquire().await?;
    migrator()?.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_config(url: String) -> DatabaseConfig {
        DatabaseConfig {
            url,
            max_connections: 2,
            acquire_timeout_secs: 5,
            busy_timeout_ms: 5000,
        }
    }

    #[tokio::test]
    async fn test_create_pool_applies_pragmas() {
        let dir = temp_dir::TempDir::new().unwrap();
        let url = format!("sqlite:{}", dir.child("pragmas.db").display());
        let pool = create_pool(&database_config(url), 1).await.unwrap();

        let journal_mode: (String,) = sqlx::query_as("PRAGMA journal_mode")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(journal_mode.0, "wal");

        let foreign_keys: (i32,) = sqlx::query_as("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(foreign_keys.0, 1);

        let busy_timeout: (i64,) = sqlx::query_as("PRAGMA busy_timeout")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(busy_timeout.0, 5000);
    }

    #[tokio::test]
    async fn test_read_pool_rejects_writes() {
        let dir = temp_dir::TempDir::new().unwrap();
        let config = database_config(format!("sqlite:{}", dir.child("ro.db").display()));

        let write_pool = create_write_pool(&config).await.unwrap();
        run_migrations(&write_pool).await.unwrap();

        let read_pool = create_read_pool(&config).await.unwrap();
        let result = sqlx::query("DELETE FROM member").execute(&read_pool).await;

        assert!(result.is_err());
    }
}
