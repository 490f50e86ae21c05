mod food_repo;
mod meallog_repo;
mod myset_repo;
mod settings_repo;

pub use food_repo::{FoodRepository, SEARCH_LIMIT};
pub use meallog_repo::MealLogRepository;
pub use myset_repo::MySetRepository;
pub use settings_repo::SettingsRepository;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::PathBuf;
use std::str::FromStr;

/// Failures of the record store. Any operation against a store that cannot
/// be opened or used surfaces as `Unavailable`; callers treat it as fatal to
/// the operation, not to the process.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Unavailable(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Failed to prepare database directory: {}", e),
            StoreError::Unavailable(e) => write!(f, "Store unavailable: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Unavailable(e) => Some(e),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e)
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        StoreError::Unavailable(e.into())
    }
}

/// Initialize the database connection pool and run migrations
pub async fn init_db(db_path: Option<PathBuf>) -> Result<SqlitePool, StoreError> {
    let path = db_path.expect("database_path must be provided");

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(StoreError::Io)?;
    }

    let db_url = format!("sqlite:{}?mode=rwc", path.display());

    let options = SqliteConnectOptions::from_str(&db_url)
        .map_err(StoreError::Unavailable)?
        .foreign_keys(true)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_init_db_creates_tables() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool = init_db(Some(db_path)).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name NOT LIKE '_sqlx_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let table_names: Vec<&str> = tables.iter().map(|t| t.0.as_str()).collect();
        assert!(table_names.contains(&"settings"));
        assert!(table_names.contains(&"foods"));
        assert!(table_names.contains(&"meal_logs"));
        assert!(table_names.contains(&"my_sets"));
    }

    #[tokio::test]
    async fn test_init_db_is_idempotent() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let pool = init_db(Some(db_path.clone())).await.unwrap();
        pool.close().await;

        // Re-opening an existing database must succeed.
        init_db(Some(db_path)).await.unwrap();
    }
}
