//! Whole-store backup and restore.
//!
//! Export reads the three user-owned tables into a versioned snapshot; the
//! food catalog is excluded because the seeder can always rebuild it.
//! Import upserts the snapshot's rows inside a single transaction spanning
//! all three tables: either every row lands or none do.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::{MealLogRepository, MySetRepository, SettingsRepository, StoreError};
use crate::models::{Snapshot, SNAPSHOT_VERSION};

#[derive(Debug)]
pub enum TransferError {
    Store(StoreError),
    /// The import transaction failed and was rolled back; no table changed.
    ImportFailed(sqlx::Error),
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferError::Store(e) => write!(f, "Export failed: {}", e),
            TransferError::ImportFailed(e) => {
                write!(f, "Import failed, no data was changed: {}", e)
            }
        }
    }
}

impl std::error::Error for TransferError {}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        TransferError::Store(e)
    }
}

/// Reads all settings, meal logs and sets concurrently into a snapshot.
pub async fn export_all(pool: &SqlitePool) -> Result<Snapshot, TransferError> {
    let settings_repo = SettingsRepository::new(pool.clone());
    let meallog_repo = MealLogRepository::new(pool.clone());
    let myset_repo = MySetRepository::new(pool.clone());

    let (settings, meal_logs, my_sets) = tokio::try_join!(
        settings_repo.all(),
        meallog_repo.all(),
        myset_repo.all(),
    )?;

    Ok(Snapshot {
        version: SNAPSHOT_VERSION,
        exported_at: Utc::now(),
        settings,
        meal_logs,
        my_sets,
    })
}

/// Upserts every row of the snapshot in one transaction.
///
/// Rows are matched by their identity key and overwritten; rows the
/// snapshot does not mention are left alone (this is a merge-restore, not a
/// wipe). Empty or missing lists skip their table. Any failure rolls the
/// whole transaction back.
pub async fn import_all(pool: &SqlitePool, snapshot: &Snapshot) -> Result<(), TransferError> {
    let mut tx = pool.begin().await.map_err(TransferError::ImportFailed)?;

    for s in &snapshot.settings {
        sqlx::query(
            r#"
            INSERT INTO settings
                (id, weight_kg, height_cm, age, gender, activity_level, goal,
                 bmr, tdee, target_calories, target_p, target_f, target_c, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                age = excluded.age,
                gender = excluded.gender,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                bmr = excluded.bmr,
                tdee = excluded.tdee,
                target_calories = excluded.target_calories,
                target_p = excluded.target_p,
                target_f = excluded.target_f,
                target_c = excluded.target_c,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(s.id)
        .bind(s.weight_kg)
        .bind(s.height_cm)
        .bind(s.age)
        .bind(s.gender.to_string())
        .bind(s.activity_level.to_string())
        .bind(s.goal.to_string())
        .bind(s.bmr)
        .bind(s.tdee)
        .bind(s.target_calories)
        .bind(s.target_p)
        .bind(s.target_f)
        .bind(s.target_c)
        .bind(s.updated_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(TransferError::ImportFailed)?;
    }

    for log in &snapshot.meal_logs {
        sqlx::query(
            r#"
            INSERT INTO meal_logs
                (id, date, meal_type, food_id, name, amount_g, calories, protein, fat, carb, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                date = excluded.date,
                meal_type = excluded.meal_type,
                food_id = excluded.food_id,
                name = excluded.name,
                amount_g = excluded.amount_g,
                calories = excluded.calories,
                protein = excluded.protein,
                fat = excluded.fat,
                carb = excluded.carb,
                created_at = excluded.created_at
            "#,
        )
        .bind(log.id)
        .bind(log.date.to_string())
        .bind(log.meal_type.to_string())
        .bind(log.food_id)
        .bind(&log.name)
        .bind(log.amount_g)
        .bind(log.calories)
        .bind(log.protein)
        .bind(log.fat)
        .bind(log.carb)
        .bind(log.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(TransferError::ImportFailed)?;
    }

    for set in &snapshot.my_sets {
        let items = serde_json::to_string(&set.items).unwrap_or_else(|_| "[]".to_string());
        sqlx::query(
            r#"
            INSERT INTO my_sets (id, name, items, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                items = excluded.items,
                created_at = excluded.created_at
            "#,
        )
        .bind(set.id)
        .bind(&set.name)
        .bind(&items)
        .bind(set.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(TransferError::ImportFailed)?;
    }

    tx.commit().await.map_err(TransferError::ImportFailed)?;
    Ok(())
}
