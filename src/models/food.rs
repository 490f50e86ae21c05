use serde::{Deserialize, Serialize};

/// One row of the food catalog. Nutrient values are per 100 g of the food.
///
/// The catalog is bulk-loaded from the seed source and read-only from the
/// user's point of view; ids come from the dataset, not the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub fat: f64,
    #[serde(default)]
    pub carb: f64,
}

impl Food {
    pub fn new(id: i64, name: impl Into<String>, calories: f64, protein: f64, fat: f64, carb: f64) -> Self {
        Self {
            id,
            name: name.into(),
            calories,
            protein,
            fat,
            carb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_json_roundtrip() {
        let food = Food::new(101, "Brown rice, cooked", 152.0, 2.8, 1.0, 34.0);
        let json = serde_json::to_string(&food).unwrap();
        let parsed: Food = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, food);
    }

    #[test]
    fn test_food_missing_nutrients_default_to_zero() {
        let parsed: Food = serde_json::from_str(r#"{"id": 7, "name": "Water"}"#).unwrap();
        assert_eq!(parsed.calories, 0.0);
        assert_eq!(parsed.protein, 0.0);
        assert_eq!(parsed.fat, 0.0);
        assert_eq!(parsed.carb, 0.0);
    }
}
