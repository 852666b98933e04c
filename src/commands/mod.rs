use clap::ValueEnum;

mod alert;
mod config_cmd;
mod exercise;
mod export_cmd;
mod food;
mod goals;
mod measure;
mod profile;
mod recipe;
mod reset;

pub use alert::AlertsCommand;
pub use config_cmd::ConfigCommand;
pub use exercise::ExerciseCommand;
pub use export_cmd::ExportCommand;
pub use food::FoodCommand;
pub use goals::GoalsCommand;
pub use measure::{WaistCommand, WeightCommand};
pub use profile::ProfileCommand;
pub use recipe::RecipeCommand;
pub use reset::ResetCommand;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Tracker mutations report failure through their error state instead of
/// a return value; commands turn that into a CLI error.
fn check_tracker(tracker: &crate::tracker::Tracker) -> Result<(), Box<dyn std::error::Error>> {
    match tracker.error() {
        Some(error) => Err(error.to_string().into()),
        None => Ok(()),
    }
}
