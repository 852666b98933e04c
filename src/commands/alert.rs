use chrono::Local;
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{check_tracker, OutputFormat};
use crate::models::{Alert, AlertKind, AlertPriority};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct AlertsCommand {
    #[command(subcommand)]
    pub command: AlertsSubcommand,
}

#[derive(Subcommand)]
pub enum AlertsSubcommand {
    /// List saved alerts plus today's rule-derived alerts
    List {
        /// Include alerts already marked as read
        #[arg(long)]
        all: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Save a new alert
    Add {
        /// Alert title
        title: String,

        /// Alert message
        #[arg(long)]
        message: String,

        #[arg(long, value_enum, default_value = "reminder")]
        kind: AlertKind,

        #[arg(long, value_enum, default_value = "medium")]
        priority: AlertPriority,
    },

    /// Mark an alert as read
    Read {
        /// Alert ID (UUID)
        id: Uuid,
    },
}

impl AlertsCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            AlertsSubcommand::List { all, format } => {
                let saved: Vec<&Alert> = tracker
                    .data()
                    .alerts
                    .iter()
                    .filter(|a| *all || !a.read)
                    .collect();
                let smart =
                    tracker.smart_alerts(tracker.current_date(), Local::now().time());

                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&serde_json::json!({
                                "saved": saved,
                                "smart": smart,
                            }))?
                        );
                    }
                    OutputFormat::Text => {
                        if saved.is_empty() && smart.is_empty() {
                            println!("No alerts");
                            return Ok(());
                        }
                        if !saved.is_empty() {
                            println!("Saved alerts:");
                            for alert in &saved {
                                println!("  {}  {}", alert.id, alert);
                            }
                        }
                        if !smart.is_empty() {
                            println!("Today:");
                            for alert in &smart {
                                println!("  {}", alert);
                            }
                        }
                    }
                }
                Ok(())
            }

            AlertsSubcommand::Add {
                title,
                message,
                kind,
                priority,
            } => {
                if title.trim().is_empty() {
                    return Err("Alert title cannot be empty".into());
                }
                let alert = Alert::new(*kind, title.trim(), message.clone(), *priority);
                tracker.add_alert(alert).await;
                check_tracker(tracker)?;
                println!("Alert saved");
                Ok(())
            }

            AlertsSubcommand::Read { id } => {
                tracker.mark_alert_as_read(*id).await;
                check_tracker(tracker)?;
                println!("Alert {} marked as read", id);
                Ok(())
            }
        }
    }
}
