use sqlx::SqlitePool;

use super::StoreError;
use crate::models::Food;

/// Cap on search results; an empty query never scans the whole catalog.
pub const SEARCH_LIMIT: i64 = 30;

pub struct FoodRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct FoodRow {
    id: i64,
    name: String,
    calories: f64,
    protein: f64,
    fat: f64,
    carb: f64,
}

impl FoodRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM foods")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Food>, StoreError> {
        let row: Option<FoodRow> = sqlx::query_as("SELECT * FROM foods WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(hydrate_food))
    }

    /// Case-insensitive substring search on `name`, capped at 30 rows.
    /// A blank query returns nothing rather than the full catalog.
    pub async fn search(&self, query: &str) -> Result<Vec<Food>, StoreError> {
        let q = query.trim();
        if q.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<FoodRow> =
            sqlx::query_as("SELECT * FROM foods WHERE instr(LOWER(name), LOWER(?)) > 0 LIMIT ?")
                .bind(q)
                .bind(SEARCH_LIMIT)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(hydrate_food).collect())
    }

    /// Replaces the whole catalog in one transaction: clear, then bulk
    /// insert. Stale rows never survive alongside new data, and a failure
    /// leaves the previous catalog in place.
    pub async fn replace_all(&self, foods: &[Food]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM foods")
            .execute(&mut *tx)
            .await?;

        for food in foods {
            sqlx::query(
                "INSERT OR REPLACE INTO foods (id, name, calories, protein, fat, carb) VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(food.id)
            .bind(&food.name)
            .bind(food.calories)
            .bind(food.protein)
            .bind(food.fat)
            .bind(food.carb)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

fn hydrate_food(row: FoodRow) -> Food {
    Food {
        id: row.id,
        name: row.name,
        calories: row.calories,
        protein: row.protein,
        fat: row.fat,
        carb: row.carb,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::TempDir;

    struct TestContext {
        repo: FoodRepository,
        _temp_dir: TempDir,
    }

    async fn setup() -> TestContext {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");
        let pool = init_db(Some(db_path)).await.unwrap();
        TestContext {
            repo: FoodRepository::new(pool),
            _temp_dir: temp_dir,
        }
    }

    fn sample_foods() -> Vec<Food> {
        vec![
            Food::new(1, "White rice, cooked", 156.0, 2.5, 0.3, 35.6),
            Food::new(2, "Brown rice, cooked", 152.0, 2.8, 1.0, 34.0),
            Food::new(3, "Chicken breast, raw", 108.0, 22.3, 1.5, 0.0),
            Food::new(4, "Egg, whole", 142.0, 12.2, 10.2, 0.4),
        ]
    }

    #[tokio::test]
    async fn test_count_empty() {
        let ctx = setup().await;
        assert_eq!(ctx.repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_replace_all_and_count() {
        let ctx = setup().await;
        ctx.repo.replace_all(&sample_foods()).await.unwrap();
        assert_eq!(ctx.repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_rows() {
        let ctx = setup().await;
        ctx.repo.replace_all(&sample_foods()).await.unwrap();

        let replacement = vec![
            Food::new(100, "Salmon, raw", 139.0, 22.5, 4.5, 0.1),
            Food::new(101, "Tofu, firm", 80.0, 7.0, 4.9, 1.5),
        ];
        ctx.repo.replace_all(&replacement).await.unwrap();

        assert_eq!(ctx.repo.count().await.unwrap(), 2);
        assert!(ctx.repo.get_by_id(1).await.unwrap().is_none());
        assert_eq!(
            ctx.repo.get_by_id(100).await.unwrap().unwrap().name,
            "Salmon, raw"
        );
    }

    #[tokio::test]
    async fn test_search_case_insensitive_substring() {
        let ctx = setup().await;
        ctx.repo.replace_all(&sample_foods()).await.unwrap();

        let results = ctx.repo.search("RICE").await.unwrap();
        assert_eq!(results.len(), 2);

        let results = ctx.repo.search("chicken").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);
    }

    #[tokio::test]
    async fn test_search_blank_query_returns_nothing() {
        let ctx = setup().await;
        ctx.repo.replace_all(&sample_foods()).await.unwrap();

        assert!(ctx.repo.search("").await.unwrap().is_empty());
        assert!(ctx.repo.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_caps_results() {
        let ctx = setup().await;
        let many: Vec<Food> = (0..50)
            .map(|i| Food::new(i, format!("Test food {}", i), 100.0, 1.0, 1.0, 1.0))
            .collect();
        ctx.repo.replace_all(&many).await.unwrap();

        let results = ctx.repo.search("test food").await.unwrap();
        assert_eq!(results.len(), SEARCH_LIMIT as usize);
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let ctx = setup().await;
        ctx.repo.replace_all(&sample_foods()).await.unwrap();
        assert!(ctx.repo.search("pizza").await.unwrap().is_empty());
    }
}
