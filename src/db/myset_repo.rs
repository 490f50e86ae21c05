use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::models::{MySet, NewMySet, SetItem};

pub struct MySetRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MySetRow {
    id: i64,
    name: String,
    items: String,
    created_at: String,
}

impl MySetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new set, stamping `created_at`. The store assigns the id.
    pub async fn add(&self, set: &NewMySet) -> Result<i64, StoreError> {
        let items = serde_json::to_string(&set.items).unwrap_or_else(|_| "[]".to_string());
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO my_sets (name, items, created_at) VALUES (?, ?, ?)")
            .bind(&set.name)
            .bind(&items)
            .bind(&created_at)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// All sets, most recently created first.
    pub async fn list(&self) -> Result<Vec<MySet>, StoreError> {
        let rows: Vec<MySetRow> =
            sqlx::query_as("SELECT * FROM my_sets ORDER BY created_at DESC, id DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(hydrate_myset).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<MySet>, StoreError> {
        let row: Option<MySetRow> = sqlx::query_as("SELECT * FROM my_sets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(hydrate_myset))
    }

    /// Deletes by id; deleting an id that does not exist is a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM my_sets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All set rows in id order, for export.
    pub async fn all(&self) -> Result<Vec<MySet>, StoreError> {
        let rows: Vec<MySetRow> = sqlx::query_as("SELECT * FROM my_sets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(hydrate_myset).collect())
    }
}

fn hydrate_myset(row: MySetRow) -> MySet {
    let items: Vec<SetItem> = serde_json::from_str(&row.items).unwrap_or_default();

    MySet {
        id: row.id,
        name: row.name,
        items,
        created_at: DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    }
}
