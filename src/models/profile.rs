use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::nutrition::Targets;

/// Identity key of the singleton settings row.
pub const SETTINGS_ID: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(format!(
                "Unknown gender '{}'. Valid options: male, female",
                s
            )),
        }
    }
}

/// Self-reported activity level, each mapped to a fixed TDEE multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ActivityLevel {
    /// Multiplier applied to BMR when estimating total daily expenditure.
    pub fn factor(self) -> f64 {
        match self {
            ActivityLevel::Low => 1.50,
            ActivityLevel::Moderate => 1.75,
            ActivityLevel::High => 2.00,
            ActivityLevel::VeryHigh => 2.30,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityLevel::Low => write!(f, "low"),
            ActivityLevel::Moderate => write!(f, "moderate"),
            ActivityLevel::High => write!(f, "high"),
            ActivityLevel::VeryHigh => write!(f, "very_high"),
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(ActivityLevel::Low),
            "moderate" => Ok(ActivityLevel::Moderate),
            "high" => Ok(ActivityLevel::High),
            "very_high" => Ok(ActivityLevel::VeryHigh),
            _ => Err(format!(
                "Unknown activity level '{}'. Valid options: low, moderate, high, very_high",
                s
            )),
        }
    }
}

/// Dietary goal, each mapped to a calorie adjustment and a protein coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Cut,
    Maintain,
    Bulk,
}

impl Goal {
    /// Daily kcal added to (or removed from) TDEE.
    pub fn calorie_adjust(self) -> i64 {
        match self {
            Goal::Cut => -500,
            Goal::Maintain => 0,
            Goal::Bulk => 350,
        }
    }

    /// Protein target in grams per kilogram of bodyweight.
    pub fn protein_per_kg(self) -> f64 {
        match self {
            Goal::Cut => 2.2,
            Goal::Bulk => 2.0,
            Goal::Maintain => 1.8,
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goal::Cut => write!(f, "cut"),
            Goal::Maintain => write!(f, "maintain"),
            Goal::Bulk => write!(f, "bulk"),
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cut" => Ok(Goal::Cut),
            "maintain" => Ok(Goal::Maintain),
            "bulk" => Ok(Goal::Bulk),
            _ => Err(format!(
                "Unknown goal '{}'. Valid options: cut, maintain, bulk",
                s
            )),
        }
    }
}

/// Physiological inputs the nutrition engine derives targets from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// The singleton settings record: the user profile plus the derived targets
/// persisted alongside it. At most one row exists; its absence means
/// onboarding has not completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: i64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub target_p: i64,
    pub target_f: i64,
    pub target_c: i64,
    pub updated_at: DateTime<Utc>,
}

impl Settings {
    pub fn new(profile: &Profile, targets: &Targets) -> Self {
        Self {
            id: SETTINGS_ID,
            weight_kg: profile.weight_kg,
            height_cm: profile.height_cm,
            age: profile.age,
            gender: profile.gender,
            activity_level: profile.activity_level,
            goal: profile.goal,
            bmr: targets.bmr,
            tdee: targets.tdee,
            target_calories: targets.target_calories,
            target_p: targets.target_p,
            target_f: targets.target_f,
            target_c: targets.target_c,
            updated_at: Utc::now(),
        }
    }

    /// The profile portion of the record, for re-running the calculation.
    pub fn profile(&self) -> Profile {
        Profile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            gender: self.gender,
            activity_level: self.activity_level,
            goal: self.goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition;

    #[test]
    fn test_gender_roundtrip() {
        assert_eq!(Gender::from_str("male").unwrap(), Gender::Male);
        assert_eq!(Gender::from_str("FEMALE").unwrap(), Gender::Female);
        assert_eq!(format!("{}", Gender::Male), "male");
        assert!(Gender::from_str("other").is_err());
    }

    #[test]
    fn test_activity_level_factors() {
        assert_eq!(ActivityLevel::Low.factor(), 1.50);
        assert_eq!(ActivityLevel::Moderate.factor(), 1.75);
        assert_eq!(ActivityLevel::High.factor(), 2.00);
        assert_eq!(ActivityLevel::VeryHigh.factor(), 2.30);
    }

    #[test]
    fn test_activity_level_from_str() {
        assert_eq!(
            ActivityLevel::from_str("very_high").unwrap(),
            ActivityLevel::VeryHigh
        );
        assert_eq!(
            ActivityLevel::from_str("Moderate").unwrap(),
            ActivityLevel::Moderate
        );
        assert!(ActivityLevel::from_str("extreme").is_err());
    }

    #[test]
    fn test_activity_level_json() {
        let json = serde_json::to_string(&ActivityLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very_high\"");
        let parsed: ActivityLevel = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ActivityLevel::VeryHigh);
    }

    #[test]
    fn test_goal_tables() {
        assert_eq!(Goal::Cut.calorie_adjust(), -500);
        assert_eq!(Goal::Maintain.calorie_adjust(), 0);
        assert_eq!(Goal::Bulk.calorie_adjust(), 350);
        assert_eq!(Goal::Cut.protein_per_kg(), 2.2);
        assert_eq!(Goal::Bulk.protein_per_kg(), 2.0);
        assert_eq!(Goal::Maintain.protein_per_kg(), 1.8);
    }

    #[test]
    fn test_settings_from_profile() {
        let profile = Profile {
            weight_kg: 70.0,
            height_cm: 175.0,
            age: 30,
            gender: Gender::Male,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Maintain,
        };
        let targets = nutrition::calc_all(&profile);
        let settings = Settings::new(&profile, &targets);

        assert_eq!(settings.id, SETTINGS_ID);
        assert_eq!(settings.bmr, targets.bmr);
        assert_eq!(settings.target_calories, targets.target_calories);
        assert_eq!(settings.profile(), profile);
    }

    #[test]
    fn test_settings_json_roundtrip() {
        let profile = Profile {
            weight_kg: 58.5,
            height_cm: 162.0,
            age: 41,
            gender: Gender::Female,
            activity_level: ActivityLevel::Low,
            goal: Goal::Cut,
        };
        let settings = Settings::new(&profile, &nutrition::calc_all(&profile));
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
