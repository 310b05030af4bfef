#![cfg(test)]
use tokio::sync::OnceCell;
use sea_orm::DatabaseConnection;
use models::db::{connect_with_config, migrate};

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

/// Connection for database-backed tests, or `None` when they should be skipped
/// (`SKIP_DB_TESTS` set, or no `DATABASE_URL` in the environment or `.env`).
pub async fn get_db() -> Result<Option<DatabaseConnection>, anyhow::Error> {
    let _ = dotenvy::dotenv();
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }

    let mut cfg = configs::DatabaseConfig::default();
    cfg.min_connections = 1;
    cfg.acquire_timeout_secs = 10;
    let db = connect_with_config(&cfg).await?;
    MIGRATED
        .get_or_try_init(|| async { migrate(&db).await })
        .await?;
    Ok(Some(db))
}
