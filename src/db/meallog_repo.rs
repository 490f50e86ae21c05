use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::models::{MealLog, MealType, NewMealLog};

pub struct MealLogRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct MealLogRow {
    id: i64,
    date: String,
    meal_type: String,
    food_id: Option<i64>,
    name: String,
    amount_g: f64,
    calories: f64,
    protein: f64,
    fat: f64,
    carb: f64,
    created_at: String,
}

impl MealLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a new log entry, stamping `created_at`. The store assigns the
    /// id; concurrent inserts each receive a distinct one.
    pub async fn add(&self, log: &NewMealLog) -> Result<i64, StoreError> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO meal_logs
                (date, meal_type, food_id, name, amount_g, calories, protein, fat, carb, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(log.date.to_string())
        .bind(log.meal_type.to_string())
        .bind(log.food_id)
        .bind(&log.name)
        .bind(log.amount_g)
        .bind(log.calories)
        .bind(log.protein)
        .bind(log.fat)
        .bind(log.carb)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<MealLog>, StoreError> {
        let row: Option<MealLogRow> = sqlx::query_as("SELECT * FROM meal_logs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(hydrate_meallog))
    }

    pub async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<MealLog>, StoreError> {
        let rows: Vec<MealLogRow> =
            sqlx::query_as("SELECT * FROM meal_logs WHERE date = ? ORDER BY meal_type, id")
                .bind(date.to_string())
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(hydrate_meallog).collect())
    }

    /// Logs within the range, inclusive on both bounds. Dates are compared
    /// as zero-padded ISO strings.
    pub async fn list_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MealLog>, StoreError> {
        let rows: Vec<MealLogRow> = sqlx::query_as(
            "SELECT * FROM meal_logs WHERE date >= ? AND date <= ? ORDER BY date, meal_type",
        )
        .bind(from.to_string())
        .bind(to.to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(hydrate_meallog).collect())
    }

    /// Deletes by id; deleting an id that does not exist is a no-op.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM meal_logs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// All log rows, for export.
    pub async fn all(&self) -> Result<Vec<MealLog>, StoreError> {
        let rows: Vec<MealLogRow> = sqlx::query_as("SELECT * FROM meal_logs ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(hydrate_meallog).collect())
    }
}

fn hydrate_meallog(row: MealLogRow) -> MealLog {
    MealLog {
        id: row.id,
        date: NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").unwrap_or_default(),
        meal_type: row.meal_type.parse().unwrap_or(MealType::Snack),
        food_id: row.food_id,
        name: row.name,
        amount_g: row.amount_g,
        calories: row.calories,
        protein: row.protein,
        fat: row.fat,
        carb: row.carb,
        created_at: DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    }
}
