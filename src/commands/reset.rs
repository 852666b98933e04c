use clap::Args;

use super::check_tracker;
use crate::tracker::Tracker;

#[derive(Args)]
pub struct ResetCommand {
    /// Confirm deletion of all local and stored data
    #[arg(long)]
    pub yes: bool,
}

impl ResetCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        if !self.yes {
            return Err("This deletes all tracked data. Re-run with --yes to confirm.".into());
        }
        tracker.reset_data().await;
        check_tracker(tracker)?;
        println!("All data removed");
        Ok(())
    }
}
