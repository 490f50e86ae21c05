use clap::{Args, Subcommand};
use sqlx::SqlitePool;

use crate::config::Config;
use crate::db::FoodRepository;
use crate::seed;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Search the catalog by name (case-insensitive, max 30 results)
    Search { query: String },

    /// Refresh the catalog from the seed source now
    Seed,
}

impl FoodCommand {
    pub async fn run(
        &self,
        repo: &FoodRepository,
        pool: &SqlitePool,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Search { query } => {
                let foods = repo.search(query).await?;

                if foods.is_empty() {
                    println!("No foods matched '{}'.", query);
                    return Ok(());
                }

                println!("Per 100 g:");
                for food in &foods {
                    println!(
                        "  [{}] {} - {:.0} kcal, P {:.1} / F {:.1} / C {:.1} g",
                        food.id, food.name, food.calories, food.protein, food.fat, food.carb
                    );
                }
                Ok(())
            }

            FoodSubcommand::Seed => {
                // Same routine the startup path spawns, awaited here so the
                // user sees the outcome.
                seed::seed_foods_if_empty(pool.clone(), config.foods_url.clone()).await;
                println!("Catalog now holds {} foods.", repo.count().await?);
                Ok(())
            }
        }
    }
}
