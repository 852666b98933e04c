use clap::{Args, Subcommand};

use super::{check_tracker, OutputFormat};
use crate::models::MacroGoalsPatch;
use crate::tracker::Tracker;

#[derive(Args)]
pub struct GoalsCommand {
    #[command(subcommand)]
    pub command: GoalsSubcommand,
}

#[derive(Subcommand)]
pub enum GoalsSubcommand {
    /// Show the daily macro goals
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update one or more goal values
    Set {
        /// Daily calorie target (kcal)
        #[arg(long)]
        calories: Option<f64>,

        /// Protein target (g)
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrate target (g)
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat target (g)
        #[arg(long)]
        fat: Option<f64>,

        /// Fiber target (g)
        #[arg(long)]
        fiber: Option<f64>,
    },
}

impl GoalsCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalsSubcommand::Show { format } => {
                let goals = &tracker.data().macro_goals;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(goals)?);
                    }
                    OutputFormat::Text => {
                        println!("Daily goals: {}", goals);
                    }
                }
                Ok(())
            }

            GoalsSubcommand::Set {
                calories,
                protein,
                carbs,
                fat,
                fiber,
            } => {
                let patch = MacroGoalsPatch {
                    calories: *calories,
                    protein: *protein,
                    carbs: *carbs,
                    fat: *fat,
                    fiber: *fiber,
                };
                if patch.calories.is_none()
                    && patch.protein.is_none()
                    && patch.carbs.is_none()
                    && patch.fat.is_none()
                    && patch.fiber.is_none()
                {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                tracker.update_macro_goals(patch).await;
                check_tracker(tracker)?;

                println!("Goals updated: {}", tracker.data().macro_goals);
                Ok(())
            }
        }
    }
}
