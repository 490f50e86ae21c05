use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::StoreError;
use crate::models::{ActivityLevel, Gender, Goal, Settings, SETTINGS_ID};

pub struct SettingsRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct SettingsRow {
    id: i64,
    weight_kg: f64,
    height_cm: f64,
    age: i64,
    gender: String,
    activity_level: String,
    goal: String,
    bmr: i64,
    tdee: i64,
    target_calories: i64,
    target_p: i64,
    target_f: i64,
    target_c: i64,
    updated_at: String,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetches the singleton settings row. `None` means setup has never
    /// completed; callers use this as the onboarding signal.
    pub async fn get(&self) -> Result<Option<Settings>, StoreError> {
        let row: Option<SettingsRow> = sqlx::query_as("SELECT * FROM settings WHERE id = ?")
            .bind(SETTINGS_ID)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(hydrate_settings))
    }

    /// Upserts the singleton row, replacing every field and stamping
    /// `updated_at` with the current time. Whatever id the caller put on the
    /// record is ignored; the row is always keyed by the fixed id.
    pub async fn save(&self, settings: &Settings) -> Result<(), StoreError> {
        let updated_at = Utc::now().to_rfc3339();

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
        .bind(SETTINGS_ID)
        .bind(settings.weight_kg)
        .bind(settings.height_cm)
        .bind(settings.age)
        .bind(settings.gender.to_string())
        .bind(settings.activity_level.to_string())
        .bind(settings.goal.to_string())
        .bind(settings.bmr)
        .bind(settings.tdee)
        .bind(settings.target_calories)
        .bind(settings.target_p)
        .bind(settings.target_f)
        .bind(settings.target_c)
        .bind(&updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// All settings rows, for export. In practice zero or one.
    pub async fn all(&self) -> Result<Vec<Settings>, StoreError> {
        let rows: Vec<SettingsRow> = sqlx::query_as("SELECT * FROM settings ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(hydrate_settings).collect())
    }
}

fn hydrate_settings(row: SettingsRow) -> Settings {
    Settings {
        id: row.id,
        weight_kg: row.weight_kg,
        height_cm: row.height_cm,
        age: row.age,
        // Unrecognized stored values fall back to the defaults the
        // calculation tables define for "other": female constant,
        // 1.75 activity factor, no goal adjustment.
        gender: row.gender.parse().unwrap_or(Gender::Female),
        activity_level: row.activity_level.parse().unwrap_or(ActivityLevel::Moderate),
        goal: row.goal.parse().unwrap_or(Goal::Maintain),
        bmr: row.bmr,
        tdee: row.tdee,
        target_calories: row.target_calories,
        target_p: row.target_p,
        target_f: row.target_f,
        target_c: row.target_c,
        updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use crate::models::{ActivityLevel, Gender, Goal, Profile};
    use crate::nutrition;
    use tempfile::TempDir;

    struct TestContext {
        repo: SettingsRepository,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(Some(db_path)).await.unwrap();
        TestContext {
            repo: SettingsRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }

    fn sample_profile() -> Profile {
        Profile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        }
    }

    #[tokio::test]
    async fn test_get_absent_settings() {
        let ctx = setup().await;
        assert!(ctx.repo.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_get_settings() {
        let ctx = setup().await;
        let profile = sample_profile();
        let settings = Settings::new(&profile, &nutrition::calc_all(&profile));

        ctx.repo.save(&settings).await.unwrap();

        let fetched = ctx.repo.get().await.unwrap().unwrap();
        assert_eq!(fetched.id, SETTINGS_ID);
        assert_eq!(fetched.weight_kg, 70.0);
        assert_eq!(fetched.gender, Gender::Male);
        assert_eq!(fetched.bmr, settings.bmr);
        assert_eq!(fetched.target_c, settings.target_c);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_row() {
        let ctx = setup().await;
        let profile = sample_profile();
        let settings = Settings::new(&profile, &nutrition::calc_all(&profile));
        ctx.repo.save(&settings).await.unwrap();

        let mut updated_profile = profile;
        updated_profile.weight_kg = 68.0;
        updated_profile.goal = Goal::Cut;
        let updated = Settings::new(&updated_profile, &nutrition::calc_all(&updated_profile));
        ctx.repo.save(&updated).await.unwrap();

        // Still exactly one row, carrying the new values.
        let all = ctx.repo.all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].weight_kg, 68.0);
        assert_eq!(all[0].goal, Goal::Cut);
    }

    #[tokio::test]
    async fn test_unrecognized_enum_values_fall_back() {
        let ctx = setup().await;
        sqlx::query(
            r#"
            INSERT INTO settings
                (id, weight_kg, height_cm, age, gender, activity_level, goal, updated_at)
            VALUES (1, 70.0, 175.0, 30, 'male', 'super_ultra', 'recomp', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(&ctx.repo.pool)
        .await
        .unwrap();

        let fetched = ctx.repo.get().await.unwrap().unwrap();
        assert_eq!(fetched.activity_level, ActivityLevel::Moderate);
        assert_eq!(fetched.goal, Goal::Maintain);
    }
}
