use clap::Args;

use crate::db::SettingsRepository;
use crate::models::{ActivityLevel, Gender, Goal, Profile, Settings};
use crate::nutrition;

#[derive(Args)]
pub struct SetupCommand {
    /// Body weight in kilograms
    #[arg(long)]
    weight: f64,

    /// Height in centimeters
    #[arg(long)]
    height: f64,

    /// Age in years
    #[arg(long)]
    age: i64,

    /// Gender (male, female)
    #[arg(long)]
    gender: String,

    /// Activity level (low, moderate, high, very_high)
    #[arg(long, default_value = "moderate")]
    activity: String,

    /// Goal (cut, maintain, bulk)
    #[arg(long, default_value = "maintain")]
    goal: String,
}

impl SetupCommand {
    pub async fn run(&self, repo: &SettingsRepository) -> Result<(), Box<dyn std::error::Error>> {
        let gender: Gender = self.gender.parse().map_err(|e: String| e)?;
        let activity_level: ActivityLevel = self.activity.parse().map_err(|e: String| e)?;
        let goal: Goal = self.goal.parse().map_err(|e: String| e)?;

        let profile = Profile {
            weight_kg: self.weight,
            height_cm: self.height,
            age: self.age,
            gender,
            activity_level,
            goal,
        };

        let targets = nutrition::calc_all(&profile);
        repo.save(&Settings::new(&profile, &targets)).await?;

        println!("Profile saved. Daily targets:");
        println!();
        println!("  BMR:             {} kcal", targets.bmr);
        println!("  TDEE:            {} kcal", targets.tdee);
        println!("  Target calories: {} kcal", targets.target_calories);
        println!("  Protein:         {} g", targets.target_p);
        println!("  Fat:             {} g", targets.target_f);
        println!("  Carbs:           {} g", targets.target_c);

        Ok(())
    }
}
