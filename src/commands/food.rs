use chrono::NaiveDate;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{check_tracker, OutputFormat};
use crate::models::{NewFood, NutritionInfo, Recipe};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct FoodCommand {
    #[command(subcommand)]
    pub command: FoodSubcommand,
}

#[derive(Subcommand)]
pub enum FoodSubcommand {
    /// Log a food entry
    Add {
        /// Food name
        name: String,

        /// Calories per unit; looked up by name when omitted
        #[arg(long)]
        calories: Option<f64>,

        /// Number of units
        #[arg(long, default_value_t = 1.0)]
        quantity: f64,

        /// Unit of measurement
        #[arg(long, default_value = "porção")]
        unit: String,

        /// Protein per unit (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrates per unit (g)
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat per unit (g)
        #[arg(long)]
        fat: Option<f64>,

        /// Product barcode
        #[arg(long)]
        barcode: Option<String>,

        /// Day to log against (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log servings of a saved recipe
    AddRecipe {
        /// Recipe ID (UUID) or name
        identifier: String,

        /// Number of servings eaten
        #[arg(long, default_value_t = 1.0)]
        servings: f64,

        /// Day to log against (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Look up estimated calories for a food name
    Lookup {
        /// Food name
        name: String,
    },

    /// Remove a logged food entry
    Remove {
        /// Food entry ID (UUID)
        id: Uuid,

        /// Day the entry was logged (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List a day's foods with totals
    List {
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl FoodCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FoodSubcommand::Add {
                name,
                calories,
                quantity,
                unit,
                protein,
                carbs,
                fat,
                barcode,
                date,
            } => {
                if name.trim().is_empty() {
                    return Err("Food name cannot be empty".into());
                }
                if *quantity <= 0.0 {
                    return Err("Quantity must be a positive number".into());
                }
                if let Some(date) = date {
                    tracker.set_current_date(*date).await;
                }

                let calories = match calories {
                    Some(c) => *c,
                    None => tracker.search_calories(name),
                };

                let mut food = NewFood::new(name.trim(), calories, *quantity, unit.clone());
                if protein.is_some() || carbs.is_some() || fat.is_some() {
                    food = food.with_nutrition(NutritionInfo::new(
                        calories,
                        protein.unwrap_or(0.0),
                        carbs.unwrap_or(0.0),
                        fat.unwrap_or(0.0),
                    ));
                }
                if let Some(barcode) = barcode {
                    food = food.with_barcode(barcode.clone());
                }

                tracker.add_food(food).await;
                check_tracker(tracker)?;

                let day = tracker.get_daily_data(tracker.current_date());
                println!(
                    "Logged {} ({} {}) - {:.0} kcal. Day total: {:.0} kcal",
                    name,
                    quantity,
                    unit,
                    calories * quantity,
                    day.total_consumed()
                );
                Ok(())
            }

            FoodSubcommand::AddRecipe {
                identifier,
                servings,
                date,
            } => {
                if *servings <= 0.0 {
                    return Err("Servings must be a positive number".into());
                }
                let recipe = find_recipe(tracker, identifier)
                    .ok_or_else(|| format!("Recipe not found: {}", identifier))?;

                if let Some(date) = date {
                    tracker.set_current_date(*date).await;
                }
                tracker.add_food_from_recipe(&recipe, *servings).await;
                check_tracker(tracker)?;

                println!(
                    "Logged {} serving(s) of '{}' - {:.0} kcal",
                    servings,
                    recipe.name,
                    recipe.per_serving().calories * servings
                );
                Ok(())
            }

            FoodSubcommand::Lookup { name } => {
                let calories = tracker.search_calories(name);
                println!("{}: ~{:.0} kcal", name, calories);
                Ok(())
            }

            FoodSubcommand::Remove { id, date } => {
                let date = date.unwrap_or_else(|| tracker.current_date());
                tracker.set_current_date(date).await;
                tracker.remove_food(date, *id).await;
                check_tracker(tracker)?;
                println!("Removed food entry {}", id);
                Ok(())
            }

            FoodSubcommand::List { date, format } => {
                let date = date.unwrap_or_else(|| tracker.current_date());
                tracker.set_current_date(date).await;
                let day = tracker.get_daily_data(date);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&day)?);
                    }
                    OutputFormat::Text => {
                        if day.foods.is_empty() {
                            println!("No foods logged on {}", date);
                            return Ok(());
                        }
                        println!("Foods on {}:", date);
                        for food in &day.foods {
                            println!("  {}  {}", food.id, food);
                        }
                        println!("\nConsumed: {:.0} kcal", day.total_consumed());
                        if day.total_burned() > 0.0 {
                            println!("Burned:   {:.0} kcal", day.total_burned());
                            println!(
                                "Net:      {:.0} kcal",
                                day.total_consumed() - day.total_burned()
                            );
                        }
                        let nutrition = day.total_nutrition();
                        if nutrition.calories > 0.0 {
                            println!("Macros:   {}", nutrition);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

fn find_recipe(tracker: &Tracker, identifier: &str) -> Option<Recipe> {
    let recipes = &tracker.data().recipes;
    if let Ok(id) = Uuid::parse_str(identifier) {
        return recipes.iter().find(|r| r.id == id).cloned();
    }
    let lower = identifier.to_lowercase();
    recipes.iter().find(|r| r.name.to_lowercase() == lower).cloned()
}
