use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::food::Food;

/// One line of a reusable set, mirroring a meal-log entry without date or
/// meal type. Macro values are for the stored amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetItem {
    pub food_id: Option<i64>,
    pub name: String,
    pub amount_g: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carb: f64,
}

impl SetItem {
    pub fn from_food(food: &Food, amount_g: f64) -> Self {
        let scale = amount_g / 100.0;
        Self {
            food_id: Some(food.id),
            name: food.name.clone(),
            amount_g,
            calories: food.calories * scale,
            protein: food.protein * scale,
            fat: food.fat * scale,
            carb: food.carb * scale,
        }
    }
}

/// A reusable meal template the user can expand into logs in one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MySet {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub items: Vec<SetItem>,
    pub created_at: DateTime<Utc>,
}

/// A set before the store has assigned it an id and creation time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMySet {
    pub name: String,
    pub items: Vec<SetItem>,
}

impl NewMySet {
    pub fn new(name: impl Into<String>, items: Vec<SetItem>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }
}
