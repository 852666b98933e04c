use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Nutrition breakdown per unit of food (grams except calories/sodium).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionInfo {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
            ..Default::default()
        }
    }

    /// Scales every field by `factor` (e.g. quantity of an ingredient).
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein: self.protein * factor,
            carbs: self.carbs * factor,
            fat: self.fat * factor,
            fiber: self.fiber * factor,
            sugar: self.sugar * factor,
            sodium: self.sodium * factor,
        }
    }

    /// Divides every field by `divisor`; returns zeroes when `divisor` is 0.
    pub fn per_serving(&self, divisor: f64) -> Self {
        if divisor == 0.0 {
            return Self::default();
        }
        self.scaled(1.0 / divisor)
    }
}

impl AddAssign<&NutritionInfo> for NutritionInfo {
    fn add_assign(&mut self, other: &NutritionInfo) {
        self.calories += other.calories;
        self.protein += other.protein;
        self.carbs += other.carbs;
        self.fat += other.fat;
        self.fiber += other.fiber;
        self.sugar += other.sugar;
        self.sodium += other.sodium;
    }
}

impl fmt::Display for NutritionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal (P {:.1}g / C {:.1}g / G {:.1}g)",
            self.calories, self.protein, self.carbs, self.fat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled() {
        let n = NutritionInfo::new(100.0, 10.0, 20.0, 5.0);
        let doubled = n.scaled(2.0);
        assert_eq!(doubled.calories, 200.0);
        assert_eq!(doubled.protein, 20.0);
    }

    #[test]
    fn test_per_serving_zero_divisor() {
        let n = NutritionInfo::new(100.0, 10.0, 20.0, 5.0);
        assert_eq!(n.per_serving(0.0), NutritionInfo::default());
    }

    #[test]
    fn test_add_assign() {
        let mut total = NutritionInfo::default();
        total += &NutritionInfo::new(52.0, 0.3, 14.0, 0.2);
        total += &NutritionInfo::new(89.0, 1.1, 23.0, 0.3);
        assert_eq!(total.calories, 141.0);
        assert!((total.protein - 1.4).abs() < 1e-9);
    }

    #[test]
    fn test_json_defaults_for_missing_fields() {
        let n: NutritionInfo = serde_json::from_str(r#"{"calories": 52}"#).unwrap();
        assert_eq!(n.calories, 52.0);
        assert_eq!(n.sodium, 0.0);
    }
}
