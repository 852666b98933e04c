use chrono::NaiveDate;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{check_tracker, OutputFormat};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Log an exercise
    Add {
        /// Exercise name
        name: String,

        /// Total calories burned
        #[arg(long)]
        calories: f64,

        /// Day to log against (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a logged exercise
    Remove {
        /// Exercise entry ID (UUID)
        id: Uuid,

        /// Day the entry was logged (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List a day's exercises
    List {
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ExerciseCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExerciseSubcommand::Add {
                name,
                calories,
                date,
            } => {
                if name.trim().is_empty() {
                    return Err("Exercise name cannot be empty".into());
                }
                if *calories <= 0.0 {
                    return Err("Calories must be a positive number".into());
                }
                if let Some(date) = date {
                    tracker.set_current_date(*date).await;
                }

                tracker.add_exercise(name.trim(), *calories).await;
                check_tracker(tracker)?;

                let day = tracker.get_daily_data(tracker.current_date());
                println!(
                    "Logged {} - {:.0} kcal burned. Day total: {:.0} kcal",
                    name,
                    calories,
                    day.total_burned()
                );
                Ok(())
            }

            ExerciseSubcommand::Remove { id, date } => {
                let date = date.unwrap_or_else(|| tracker.current_date());
                tracker.set_current_date(date).await;
                tracker.remove_exercise(date, *id).await;
                check_tracker(tracker)?;
                println!("Removed exercise entry {}", id);
                Ok(())
            }

            ExerciseSubcommand::List { date, format } => {
                let date = date.unwrap_or_else(|| tracker.current_date());
                tracker.set_current_date(date).await;
                let day = tracker.get_daily_data(date);

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&day.exercises)?);
                    }
                    OutputFormat::Text => {
                        if day.exercises.is_empty() {
                            println!("No exercises logged on {}", date);
                            return Ok(());
                        }
                        println!("Exercises on {}:", date);
                        for exercise in &day.exercises {
                            println!("  {}  {}", exercise.id, exercise);
                        }
                        println!("\nBurned: {:.0} kcal", day.total_burned());
                    }
                }
                Ok(())
            }
        }
    }
}
