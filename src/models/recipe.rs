use chrono::Utc;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::nutrition::NutritionInfo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// One recipe ingredient; nutrition is per unit of the given quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeIngredient {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub nutrition: NutritionInfo,
}

impl Default for RecipeIngredient {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            quantity: 0.0,
            unit: String::new(),
            nutrition: NutritionInfo::default(),
        }
    }
}

impl RecipeIngredient {
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        nutrition: NutritionInfo,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity,
            unit: unit.into(),
            nutrition,
        }
    }
}

/// A saved recipe. `total_nutrition` is aggregated once at creation and is
/// not recomputed afterwards (there is no ingredient-edit path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub instructions: Vec<String>,
    pub total_nutrition: NutritionInfo,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cook_time: u32,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl Default for Recipe {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            description: String::new(),
            servings: 1,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            total_nutrition: NutritionInfo::default(),
            prep_time: 0,
            cook_time: 0,
            difficulty: Difficulty::default(),
            tags: Vec::new(),
            created_at: String::new(),
        }
    }
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Utc::now().to_rfc3339(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Sets the ingredients and aggregates `total_nutrition` from them.
    pub fn with_ingredients(mut self, ingredients: Vec<RecipeIngredient>) -> Self {
        self.total_nutrition = Self::aggregate_nutrition(&ingredients);
        self.ingredients = ingredients;
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_times(mut self, prep_time: u32, cook_time: u32) -> Self {
        self.prep_time = prep_time;
        self.cook_time = cook_time;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sum of ingredient nutrition scaled by ingredient quantity.
    pub fn aggregate_nutrition(ingredients: &[RecipeIngredient]) -> NutritionInfo {
        let mut total = NutritionInfo::default();
        for ingredient in ingredients {
            total += &ingredient.nutrition.scaled(ingredient.quantity);
        }
        total
    }

    pub fn per_serving(&self) -> NutritionInfo {
        self.total_nutrition.per_serving(self.servings as f64)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} porções, {})", self.name, self.servings, self.difficulty)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(f, "Total: {}", self.total_nutrition)?;
        if !self.ingredients.is_empty() {
            writeln!(f, "Ingredientes:")?;
            for ingredient in &self.ingredients {
                writeln!(
                    f,
                    "  - {} ({} {})",
                    ingredient.name, ingredient.quantity, ingredient.unit
                )?;
            }
        }
        for (i, step) in self.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, step)?;
        }
        Ok(())
    }
}
