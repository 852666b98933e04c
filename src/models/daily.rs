use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::alert::Alert;
use super::exercise::ExerciseEntry;
use super::food::FoodItem;
use super::macro_goals::MacroGoals;
use super::measurement::{WaistEntry, WeightEntry};
use super::nutrition::NutritionInfo;
use super::recipe::Recipe;
use super::user_info::UserInfo;

/// One calendar day of logged foods and exercises. Days with no entries
/// are represented as empty vectors, never as an absent value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyData {
    pub foods: Vec<FoodItem>,
    pub exercises: Vec<ExerciseEntry>,
}

impl DailyData {
    /// Sum of `calories * quantity` over the day's foods.
    pub fn total_consumed(&self) -> f64 {
        self.foods.iter().map(|f| f.total_calories()).sum()
    }

    /// Sum of calories burned over the day's exercises.
    pub fn total_burned(&self) -> f64 {
        self.exercises.iter().map(|e| e.calories).sum()
    }

    /// Macro totals over foods that carry a nutrition breakdown.
    pub fn total_nutrition(&self) -> NutritionInfo {
        let mut total = NutritionInfo::default();
        for food in &self.foods {
            if let Some(nutrition) = &food.nutrition {
                total += &nutrition.scaled(food.quantity);
            }
        }
        total
    }
}

/// The entire persisted state surface for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerData {
    pub user_info: UserInfo,
    /// Keyed by local-calendar ISO date (`YYYY-MM-DD`).
    pub daily_data: BTreeMap<String, DailyData>,
    pub weight_history: Vec<WeightEntry>,
    pub waist_history: Vec<WaistEntry>,
    pub macro_goals: MacroGoals,
    pub recipes: Vec<Recipe>,
    pub alerts: Vec<Alert>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::food::NewFood;

    #[test]
    fn test_total_consumed_sums_calories_times_quantity() {
        let mut day = DailyData::default();
        day.foods.push(NewFood::new("Arroz", 130.0, 2.0, "100g").into_item());
        day.foods.push(NewFood::new("Feijão", 127.0, 1.0, "100g").into_item());
        assert_eq!(day.total_consumed(), 130.0 * 2.0 + 127.0);
    }

    #[test]
    fn test_total_burned() {
        let mut day = DailyData::default();
        day.exercises.push(ExerciseEntry::new("Corrida", 300.0));
        day.exercises.push(ExerciseEntry::new("Musculação", 150.0));
        assert_eq!(day.total_burned(), 450.0);
    }

    #[test]
    fn test_empty_day_totals_are_zero() {
        let day = DailyData::default();
        assert_eq!(day.total_consumed(), 0.0);
        assert_eq!(day.total_burned(), 0.0);
    }

    #[test]
    fn test_total_nutrition_ignores_foods_without_breakdown() {
        let mut day = DailyData::default();
        day.foods.push(
            NewFood::new("Ovo", 155.0, 2.0, "unidade")
                .with_nutrition(NutritionInfo::new(155.0, 13.0, 1.1, 11.0))
                .into_item(),
        );
        day.foods.push(NewFood::new("Misterioso", 100.0, 1.0, "porção").into_item());

        let total = day.total_nutrition();
        assert_eq!(total.calories, 310.0);
        assert_eq!(total.protein, 26.0);
    }

    #[test]
    fn test_tracker_data_json_uses_camel_case() {
        let data = TrackerData::default();
        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"userInfo\""));
        assert!(json.contains("\"dailyData\""));
        assert!(json.contains("\"weightHistory\""));
        assert!(json.contains("\"macroGoals\""));
    }
}
