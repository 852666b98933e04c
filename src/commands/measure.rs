use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{check_tracker, OutputFormat};
use crate::models::SeriesStats;
use crate::tracker::Tracker;

#[derive(Args)]
pub struct WeightCommand {
    #[command(subcommand)]
    pub command: MeasureSubcommand,
}

#[derive(Args)]
pub struct WaistCommand {
    #[command(subcommand)]
    pub command: MeasureSubcommand,
}

#[derive(Subcommand)]
pub enum MeasureSubcommand {
    /// Record a measurement
    Add {
        /// Measured value (kg for weight, cm for waist)
        value: f64,

        /// Measurement day (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a measurement by ID
    Remove {
        /// Entry ID (UUID)
        id: Uuid,
    },

    /// List the measurement history with statistics
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl WeightCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MeasureSubcommand::Add { value, date } => {
                if *value <= 0.0 {
                    return Err("Weight must be a positive number".into());
                }
                let date = date.unwrap_or_else(|| Local::now().date_naive());
                tracker.add_weight_entry(*value, date).await;
                check_tracker(tracker)?;
                println!("Recorded weight: {:.1} kg on {}", value, date);
                Ok(())
            }

            MeasureSubcommand::Remove { id } => {
                tracker.remove_weight_entry(*id).await;
                check_tracker(tracker)?;
                println!("Removed weight entry {}", id);
                Ok(())
            }

            MeasureSubcommand::List { format } => {
                let history = &tracker.data().weight_history;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(history)?);
                    }
                    OutputFormat::Text => {
                        if history.is_empty() {
                            println!("No weight entries recorded");
                            return Ok(());
                        }
                        println!("Weight history:");
                        for entry in history {
                            println!("  {}  {}", entry.id, entry);
                        }
                        if let Some(stats) = SeriesStats::of(history.iter().map(|e| e.weight)) {
                            println!(
                                "\nMin: {:.1} kg / Max: {:.1} kg / Average: {:.1} kg",
                                stats.min, stats.max, stats.average
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

impl WaistCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MeasureSubcommand::Add { value, date } => {
                if *value <= 0.0 {
                    return Err("Waist measurement must be a positive number".into());
                }
                let date = date.unwrap_or_else(|| Local::now().date_naive());
                tracker.add_waist_entry(*value, date).await;
                check_tracker(tracker)?;
                println!("Recorded waist: {:.1} cm on {}", value, date);
                Ok(())
            }

            MeasureSubcommand::Remove { id } => {
                tracker.remove_waist_entry(*id).await;
                check_tracker(tracker)?;
                println!("Removed waist entry {}", id);
                Ok(())
            }

            MeasureSubcommand::List { format } => {
                let history = &tracker.data().waist_history;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(history)?);
                    }
                    OutputFormat::Text => {
                        if history.is_empty() {
                            println!("No waist entries recorded");
                            return Ok(());
                        }
                        println!("Waist history:");
                        for entry in history {
                            println!("  {}  {}", entry.id, entry);
                        }
                        if let Some(stats) = SeriesStats::of(history.iter().map(|e| e.waist)) {
                            println!(
                                "\nMin: {:.1} cm / Max: {:.1} cm / Average: {:.1} cm",
                                stats.min, stats.max, stats.average
                            );
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
