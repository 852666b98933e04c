use clap::{Args, ValueEnum};
use std::path::PathBuf;

use super::check_tracker;
use crate::export;
use crate::tracker::Tracker;

#[derive(Clone, ValueEnum, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

#[derive(Args)]
pub struct ExportCommand {
    /// Export format
    #[arg(long, short, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// File to write to; prints to stdout when omitted
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        // A fresh session only mirrors the current day; pull every stored
        // day in before serializing.
        tracker.clear_error();
        tracker.load_history().await;
        check_tracker(tracker)?;

        let content = match self.format {
            ExportFormat::Json => export::to_json(tracker.data())?,
            ExportFormat::Csv => export::to_csv(tracker.data())?,
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, content)?;
                println!("Exported to {}", path.display());
            }
            None => {
                println!("{}", content);
            }
        }
        Ok(())
    }
}
