use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use crate::db::{FoodRepository, MealLogRepository};
use crate::models::{MealLog, MealType, NewMealLog};

#[derive(Args)]
pub struct LogCommand {
    #[command(subcommand)]
    pub command: LogSubcommand,
}

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Log a food entry
    Add {
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,

        /// Catalog food id; macros are scaled from its per-100 g values
        #[arg(long)]
        food_id: Option<i64>,

        /// Entry name, required when no catalog food is given
        #[arg(long)]
        name: Option<String>,

        /// Amount in grams
        #[arg(long, default_value_t = 100.0)]
        amount: f64,

        /// Calories for a free-form entry
        #[arg(long, default_value_t = 0.0)]
        calories: f64,

        /// Protein grams for a free-form entry
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Fat grams for a free-form entry
        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Carbohydrate grams for a free-form entry
        #[arg(long, default_value_t = 0.0)]
        carb: f64,
    },

    /// List logged entries
    List {
        /// Single date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Range start (YYYY-MM-DD); use together with --to
        #[arg(long)]
        from: Option<String>,

        /// Range end (YYYY-MM-DD); use together with --from
        #[arg(long)]
        to: Option<String>,
    },

    /// Delete an entry by id
    Delete { id: i64 },
}

impl LogCommand {
    pub async fn run(
        &self,
        meallog_repo: &MealLogRepository,
        food_repo: &FoodRepository,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            LogSubcommand::Add {
                date,
                meal_type,
                food_id,
                name,
                amount,
                calories,
                protein,
                fat,
                carb,
            } => {
                let date = parse_date_or_today(date.as_deref())?;
                let meal_type: MealType = meal_type.parse().map_err(|e: String| e)?;

                let entry = match food_id {
                    Some(id) => {
                        let food = food_repo
                            .get_by_id(*id)
                            .await?
                            .ok_or_else(|| format!("Food not found in catalog: {}", id))?;
                        let mut entry = NewMealLog::from_food(date, meal_type, &food, *amount);
                        if let Some(n) = name {
                            entry.name = n.clone();
                        }
                        entry
                    }
                    None => {
                        let name = name
                            .as_ref()
                            .ok_or("--name is required when no --food-id is given")?;
                        NewMealLog::new(date, meal_type, name, *amount)
                            .with_macros(*calories, *protein, *fat, *carb)
                    }
                };

                let id = meallog_repo.add(&entry).await?;
                println!(
                    "Logged {} ({:.0} g): {:.0} kcal, P {:.1} / F {:.1} / C {:.1} g",
                    entry.name, entry.amount_g, entry.calories, entry.protein, entry.fat, entry.carb
                );
                println!("Log ID: {}", id);
                Ok(())
            }

            LogSubcommand::List { date, from, to } => {
                let logs = match (from, to) {
                    (None, None) => {
                        let date = parse_date_or_today(date.as_deref())?;
                        meallog_repo.list_by_date(date).await?
                    }
                    (Some(from), Some(to)) => {
                        let from = parse_date(from)?;
                        let to = parse_date(to)?;
                        meallog_repo.list_range(from, to).await?
                    }
                    _ => return Err("--from and --to must be used together".into()),
                };

                if logs.is_empty() {
                    println!("No meal logs found.");
                    return Ok(());
                }

                print_logs(&logs);
                Ok(())
            }

            LogSubcommand::Delete { id } => {
                meallog_repo.delete(*id).await?;
                println!("Deleted meal log {}", id);
                Ok(())
            }
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}

fn parse_date_or_today(s: Option<&str>) -> Result<NaiveDate, String> {
    match s {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn print_logs(logs: &[MealLog]) {
    let mut current_date: Option<NaiveDate> = None;

    for log in logs {
        if current_date != Some(log.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", log.date);
            println!("{}", "-".repeat(10));
            current_date = Some(log.date);
        }

        println!(
            "  [{}] {:10} {} ({:.0} g) - {:.0} kcal, P {:.1} / F {:.1} / C {:.1} g",
            log.id,
            log.meal_type.to_string(),
            log.name,
            log.amount_g,
            log.calories,
            log.protein,
            log.fat,
            log.carb
        );
    }

    let calories: f64 = logs.iter().map(|l| l.calories).sum();
    let protein: f64 = logs.iter().map(|l| l.protein).sum();
    let fat: f64 = logs.iter().map(|l| l.fat).sum();
    let carb: f64 = logs.iter().map(|l| l.carb).sum();
    println!();
    println!(
        "Total: {} entr{} - {:.0} kcal, P {:.1} / F {:.1} / C {:.1} g",
        logs.len(),
        if logs.len() == 1 { "y" } else { "ies" },
        calories,
        protein,
        fat,
        carb
    );
}
