use chrono::{Local, NaiveDate};
use clap::Args;

use crate::db::{MealLogRepository, SettingsRepository};
use crate::nutrition;

#[derive(Args)]
pub struct StatusCommand {
    /// Date to summarize (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,
}

impl StatusCommand {
    pub async fn run(
        &self,
        settings_repo: &SettingsRepository,
        meallog_repo: &MealLogRepository,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let settings = match settings_repo.get().await? {
            Some(s) => s,
            None => {
                println!("No profile found. Run 'pfctrack setup' to get started.");
                return Ok(());
            }
        };

        let date = match &self.date {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d))?,
            None => Local::now().date_naive(),
        };

        let logs = meallog_repo.list_by_date(date).await?;
        let calories: f64 = logs.iter().map(|l| l.calories).sum();
        let protein: f64 = logs.iter().map(|l| l.protein).sum();
        let fat: f64 = logs.iter().map(|l| l.fat).sum();
        let carb: f64 = logs.iter().map(|l| l.carb).sum();

        let target_ratios =
            nutrition::calc_pfc_ratios(settings.target_p, settings.target_f, settings.target_c);

        println!(
            "Profile: {} kg, {} cm, {} y, {}, activity {}, goal {}",
            settings.weight_kg,
            settings.height_cm,
            settings.age,
            settings.gender,
            settings.activity_level,
            settings.goal
        );
        println!(
            "Targets: {} kcal  P {} g / F {} g / C {} g  ({}/{}/{} % of energy)",
            settings.target_calories,
            settings.target_p,
            settings.target_f,
            settings.target_c,
            target_ratios.p,
            target_ratios.f,
            target_ratios.c
        );
        println!();
        println!("{} - {} entr{}", date, logs.len(), if logs.len() == 1 { "y" } else { "ies" });
        println!(
            "  Calories: {:.0} / {} kcal",
            calories, settings.target_calories
        );
        println!("  Protein:  {:.1} / {} g", protein, settings.target_p);
        println!("  Fat:      {:.1} / {} g", fat, settings.target_f);
        println!("  Carbs:    {:.1} / {} g", carb, settings.target_c);

        Ok(())
    }
}
