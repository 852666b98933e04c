mod alert;
mod daily;
mod exercise;
mod food;
mod macro_goals;
mod measurement;
mod nutrition;
mod recipe;
mod user_info;

pub use alert::{Alert, AlertKind, AlertPriority};
pub use daily::{DailyData, TrackerData};
pub use exercise::ExerciseEntry;
pub use food::{BarcodeProduct, FoodItem, NewFood};
pub use macro_goals::{MacroGoals, MacroGoalsPatch};
pub use measurement::{SeriesStats, WaistEntry, WeightEntry};
pub use nutrition::NutritionInfo;
pub use recipe::{Difficulty, Recipe, RecipeIngredient};
pub use user_info::{ActivityLevel, BodyType, Gender, UserInfo, UserInfoPatch};
