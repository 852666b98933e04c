use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{check_tracker, OutputFormat};
use crate::models::{Difficulty, NutritionInfo, Recipe, RecipeIngredient};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct RecipeCommand {
    #[command(subcommand)]
    pub command: RecipeSubcommand,
}

#[derive(Subcommand)]
pub enum RecipeSubcommand {
    /// Create a new recipe
    Add {
        /// Recipe name
        name: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,

        /// Number of servings the recipe yields
        #[arg(long, default_value_t = 1)]
        servings: u32,

        /// Ingredient as name:quantity:unit:calories (can be repeated)
        #[arg(long = "ingredient", value_name = "SPEC")]
        ingredients: Vec<String>,

        /// Instruction step (can be repeated, in order)
        #[arg(long = "instruction", value_name = "STEP")]
        instructions: Vec<String>,

        /// Prep time in minutes
        #[arg(long, default_value_t = 0)]
        prep_time: u32,

        /// Cook time in minutes
        #[arg(long, default_value_t = 0)]
        cook_time: u32,

        #[arg(long, value_enum, default_value = "medium")]
        difficulty: Difficulty,

        /// Tags (can be repeated)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },

    /// Delete a recipe
    Remove {
        /// Recipe ID (UUID)
        id: Uuid,
    },

    /// List saved recipes
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a recipe's details
    Show {
        /// Recipe ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl RecipeCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            RecipeSubcommand::Add {
                name,
                description,
                servings,
                ingredients,
                instructions,
                prep_time,
                cook_time,
                difficulty,
                tags,
            } => {
                if name.trim().is_empty() {
                    return Err("Recipe name cannot be empty".into());
                }
                if *servings == 0 {
                    return Err("Servings must be at least 1".into());
                }

                let ingredients = ingredients
                    .iter()
                    .map(|spec| parse_ingredient(spec))
                    .collect::<Result<Vec<_>, _>>()?;

                let mut recipe = Recipe::new(name.trim())
                    .with_servings(*servings)
                    .with_ingredients(ingredients)
                    .with_times(*prep_time, *cook_time)
                    .with_difficulty(*difficulty);
                if let Some(description) = description {
                    recipe = recipe.with_description(description);
                }
                if !instructions.is_empty() {
                    recipe = recipe.with_instructions(instructions.clone());
                }
                if !tags.is_empty() {
                    recipe = recipe.with_tags(tags.clone());
                }

                tracker.add_recipe(recipe.clone()).await;
                check_tracker(tracker)?;

                println!("Created recipe:");
                println!("{}", recipe);
                Ok(())
            }

            RecipeSubcommand::Remove { id } => {
                tracker.remove_recipe(*id).await;
                check_tracker(tracker)?;
                println!("Removed recipe {}", id);
                Ok(())
            }

            RecipeSubcommand::List { format } => {
                let recipes = &tracker.data().recipes;
                if recipes.is_empty() {
                    println!("No recipes saved");
                    return Ok(());
                }
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(recipes)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<30}  KCAL/SERVING", "ID", "NAME");
                        println!("{}", "-".repeat(84));
                        for recipe in recipes {
                            println!(
                                "{:<36}  {:<30}  {:.0}",
                                recipe.id,
                                recipe.name,
                                recipe.per_serving().calories
                            );
                        }
                        println!("\nTotal: {} recipe(s)", recipes.len());
                    }
                }
                Ok(())
            }

            RecipeSubcommand::Show { identifier, format } => {
                let recipes = &tracker.data().recipes;
                let recipe = if let Ok(id) = Uuid::parse_str(identifier) {
                    recipes.iter().find(|r| r.id == id)
                } else {
                    let lower = identifier.to_lowercase();
                    recipes.iter().find(|r| r.name.to_lowercase() == lower)
                };

                match recipe {
                    Some(recipe) => {
                        match format {
                            OutputFormat::Json => {
                                println!("{}", serde_json::to_string_pretty(recipe)?);
                            }
                            OutputFormat::Text => {
                                println!("{}", recipe);
                                println!("Per serving: {}", recipe.per_serving());
                            }
                        }
                        Ok(())
                    }
                    None => Err(format!("Recipe not found: {}", identifier).into()),
                }
            }
        }
    }
}

/// Parses `name:quantity:unit:calories` into an ingredient with a
/// calories-only nutrition breakdown.
fn parse_ingredient(spec: &str) -> Result<RecipeIngredient, String> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!(
            "Invalid ingredient '{}': expected name:quantity:unit:calories",
            spec
        ));
    }
    let quantity: f64 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid quantity in ingredient '{}'", spec))?;
    let calories: f64 = parts[3]
        .parse()
        .map_err(|_| format!("Invalid calories in ingredient '{}'", spec))?;

    Ok(RecipeIngredient::new(
        parts[0],
        quantity,
        parts[2],
        NutritionInfo::new(calories, 0.0, 0.0, 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient() {
        let ingredient = parse_ingredient("banana:2:unidade:89").unwrap();
        assert_eq!(ingredient.name, "banana");
        assert_eq!(ingredient.quantity, 2.0);
        assert_eq!(ingredient.unit, "unidade");
        assert_eq!(ingredient.nutrition.calories, 89.0);
    }

    #[test]
    fn test_parse_ingredient_rejects_bad_shape() {
        assert!(parse_ingredient("banana:2:unidade").is_err());
        assert!(parse_ingredient("banana:dois:unidade:89").is_err());
        assert!(parse_ingredient("banana:2:unidade:muitas").is_err());
    }
}
