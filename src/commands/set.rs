use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::db::{FoodRepository, MealLogRepository, MySetRepository};
use crate::models::{MealType, NewMealLog, NewMySet, SetItem};

#[derive(Args)]
pub struct SetCommand {
    #[command(subcommand)]
    pub command: SetSubcommand,
}

#[derive(Subcommand)]
pub enum SetSubcommand {
    /// Create a reusable set from catalog foods
    Add {
        /// Set name
        name: String,

        /// Item as FOOD_ID:GRAMS (can be repeated)
        #[arg(long = "item", value_name = "FOOD_ID:GRAMS")]
        items: Vec<String>,
    },

    /// List sets, newest first
    List,

    /// Delete a set by id
    Delete { id: i64 },

    /// Log every item of a set for a date and meal
    Log {
        id: i64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,
    },
}

impl SetCommand {
    pub async fn run(
        &self,
        myset_repo: &MySetRepository,
        meallog_repo: &MealLogRepository,
        food_repo: &FoodRepository,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SetSubcommand::Add { name, items } => {
                if items.is_empty() {
                    return Err("At least one --item FOOD_ID:GRAMS is required".into());
                }

                let mut resolved = Vec::with_capacity(items.len());
                for raw in items {
                    let (food_id, amount_g) = parse_item(raw)?;
                    let food = food_repo
                        .get_by_id(food_id)
                        .await?
                        .ok_or_else(|| format!("Food not found in catalog: {}", food_id))?;
                    resolved.push(SetItem::from_food(&food, amount_g));
                }

                let id = myset_repo.add(&NewMySet::new(name, resolved)).await?;
                println!("Created set '{}' (id {})", name, id);
                Ok(())
            }

            SetSubcommand::List => {
                let sets = myset_repo.list().await?;
                if sets.is_empty() {
                    println!("No sets saved yet.");
                    return Ok(());
                }

                for set in &sets {
                    let calories: f64 = set.items.iter().map(|i| i.calories).sum();
                    println!(
                        "[{}] {} - {} item{}, {:.0} kcal",
                        set.id,
                        set.name,
                        set.items.len(),
                        if set.items.len() == 1 { "" } else { "s" },
                        calories
                    );
                    for item in &set.items {
                        println!("    {} ({:.0} g)", item.name, item.amount_g);
                    }
                }
                Ok(())
            }

            SetSubcommand::Delete { id } => {
                myset_repo.delete(*id).await?;
                println!("Deleted set {}", id);
                Ok(())
            }

            SetSubcommand::Log {
                id,
                date,
                meal_type,
            } => {
                let set = myset_repo
                    .get_by_id(*id)
                    .await?
                    .ok_or_else(|| format!("Set not found: {}", id))?;

                let date = match date {
                    Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d))?,
                    None => Local::now().date_naive(),
                };
                let meal_type: MealType = meal_type.parse().map_err(|e: String| e)?;

                for item in &set.items {
                    let entry = NewMealLog {
                        date,
                        meal_type,
                        food_id: item.food_id,
                        name: item.name.clone(),
                        amount_g: item.amount_g,
                        calories: item.calories,
                        protein: item.protein,
                        fat: item.fat,
                        carb: item.carb,
                    };
                    meallog_repo.add(&entry).await?;
                }

                println!(
                    "Logged {} item{} from set '{}' for {} {}",
                    set.items.len(),
                    if set.items.len() == 1 { "" } else { "s" },
                    set.name,
                    date,
                    meal_type
                );
                Ok(())
            }
        }
    }
}

fn parse_item(raw: &str) -> Result<(i64, f64), String> {
    let invalid = || format!("Invalid item '{}'. Use FOOD_ID:GRAMS, e.g. 1234:150", raw);

    let (id, grams) = raw.split_once(':').ok_or_else(|| invalid())?;
    let id: i64 = id.trim().parse().map_err(|_| invalid())?;
    let grams: f64 = grams.trim().parse().map_err(|_| invalid())?;
    if grams <= 0.0 {
        return Err(invalid());
    }
    Ok((id, grams))
}
