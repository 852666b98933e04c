use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily macro targets. Defaults match a 2000 kcal plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroGoals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein: 150.0,
            carbs: 250.0,
            fat: 67.0,
            fiber: 25.0,
        }
    }
}

/// Partial goal update; `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct MacroGoalsPatch {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
}

impl MacroGoals {
    pub fn apply(&mut self, patch: MacroGoalsPatch) {
        if let Some(calories) = patch.calories {
            self.calories = calories;
        }
        if let Some(protein) = patch.protein {
            self.protein = protein;
        }
        if let Some(carbs) = patch.carbs {
            self.carbs = carbs;
        }
        if let Some(fat) = patch.fat {
            self.fat = fat;
        }
        if let Some(fiber) = patch.fiber {
            self.fiber = fiber;
        }
    }
}

impl fmt::Display for MacroGoals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} kcal / P {:.0}g / C {:.0}g / G {:.0}g / F {:.0}g",
            self.calories, self.protein, self.carbs, self.fat, self.fiber
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let goals = MacroGoals::default();
        assert_eq!(goals.calories, 2000.0);
        assert_eq!(goals.protein, 150.0);
        assert_eq!(goals.carbs, 250.0);
        assert_eq!(goals.fat, 67.0);
        assert_eq!(goals.fiber, 25.0);
    }

    #[test]
    fn test_apply_patch_is_independent() {
        let mut goals = MacroGoals::default();
        goals.apply(MacroGoalsPatch {
            protein: Some(180.0),
            ..Default::default()
        });
        assert_eq!(goals.protein, 180.0);
        assert_eq!(goals.calories, 2000.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let goals: MacroGoals = serde_json::from_str(r#"{"calories": 1800}"#).unwrap();
        assert_eq!(goals.calories, 1800.0);
        assert_eq!(goals.fiber, 25.0);
    }
}
