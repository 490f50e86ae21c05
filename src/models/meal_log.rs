use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::food::Food;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            _ => Err(format!(
                "Unknown meal type '{}'. Valid options: breakfast, lunch, dinner, snack",
                s
            )),
        }
    }
}

/// A logged food entry. Macro fields hold grams (and kcal) for the logged
/// amount, already scaled from the catalog's per-100 g values at entry time.
///
/// `food_id` is an advisory reference: the log stays valid if the catalog
/// row disappears in a reseed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    pub id: i64,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_id: Option<i64>,
    pub name: String,
    pub amount_g: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
    pub created_at: DateTime<Utc>,
}

/// A log entry before the store has assigned it an id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealLog {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub food_id: Option<i64>,
    pub name: String,
    pub amount_g: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl NewMealLog {
    pub fn new(date: NaiveDate, meal_type: MealType, name: impl Into<String>, amount_g: f64) -> Self {
        Self {
            date,
            meal_type,
            food_id: None,
            name: name.into(),
            amount_g,
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carb: 0.0,
        }
    }

    /// Builds an entry from a catalog food, scaling its per-100 g values
    /// to the logged amount.
    pub fn from_food(date: NaiveDate, meal_type: MealType, food: &Food, amount_g: f64) -> Self {
        let scale = amount_g / 100.0;
        Self {
            date,
            meal_type,
            food_id: Some(food.id),
            name: food.name.clone(),
            amount_g,
            calories: food.calories * scale,
            protein: food.protein * scale,
            fat: food.fat * scale,
            carb: food.carb * scale,
        }
    }

    pub fn with_macros(mut self, calories: f64, protein: f64, fat: f64, carb: f64) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.fat = fat;
        self.carb = carb;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_type_display() {
        assert_eq!(format!("{}", MealType::Breakfast), "breakfast");
        assert_eq!(format!("{}", MealType::Snack), "snack");
    }

    #[test]
    fn test_meal_type_from_str() {
        assert_eq!(MealType::from_str("LUNCH").unwrap(), MealType::Lunch);
        assert_eq!(MealType::from_str("dinner").unwrap(), MealType::Dinner);
        assert!(MealType::from_str("brunch").is_err());
    }

    #[test]
    fn test_meal_type_json() {
        let json = serde_json::to_string(&MealType::Breakfast).unwrap();
        assert_eq!(json, "\"breakfast\"");
        let parsed: MealType = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MealType::Breakfast);
    }

    #[test]
    fn test_from_food_scales_macros() {
        let food = Food::new(42, "Chicken breast", 108.0, 22.3, 1.5, 0.0);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = NewMealLog::from_food(date, MealType::Dinner, &food, 150.0);

        assert_eq!(entry.food_id, Some(42));
        assert_eq!(entry.name, "Chicken breast");
        assert_eq!(entry.amount_g, 150.0);
        assert_eq!(entry.calories, 162.0);
        assert!((entry.protein - 33.45).abs() < 1e-9);
        assert_eq!(entry.fat, 2.25);
        assert_eq!(entry.carb, 0.0);
    }

    #[test]
    fn test_with_macros() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = NewMealLog::new(date, MealType::Snack, "Protein bar", 60.0)
            .with_macros(210.0, 20.0, 7.0, 18.0);

        assert!(entry.food_id.is_none());
        assert_eq!(entry.calories, 210.0);
        assert_eq!(entry.protein, 20.0);
    }
}
