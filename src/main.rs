use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod export;
mod lookup;
mod metrics;
mod models;
mod store;
mod tracker;

use commands::{
    AlertsCommand, ConfigCommand, ExerciseCommand, ExportCommand, FoodCommand, GoalsCommand,
    ProfileCommand, RecipeCommand, ResetCommand, WaistCommand, WeightCommand,
};
use config::Config;
use store::{init_db, DocumentStore};
use tracker::Tracker;

#[derive(Parser)]
#[command(name = "nutrack")]
#[command(version)]
#[command(about = "A calorie and macro tracking CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the user profile and computed metrics
    Profile(ProfileCommand),

    /// Manage daily macro goals
    Goals(GoalsCommand),

    /// Log and review foods
    Food(FoodCommand),

    /// Log and review exercises
    Exercise(ExerciseCommand),

    /// Track body weight
    Weight(WeightCommand),

    /// Track waist circumference
    Waist(WaistCommand),

    /// Manage saved recipes
    Recipe(RecipeCommand),

    /// Review and manage alerts
    Alerts(AlertsCommand),

    /// Export all tracked data
    Export(ExportCommand),

    /// Delete all tracked data
    Reset(ResetCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        Some(command) => {
            let mut tracker = open_tracker(&config).await?;
            match command {
                Commands::Profile(cmd) => cmd.run(&mut tracker).await?,
                Commands::Goals(cmd) => cmd.run(&mut tracker).await?,
                Commands::Food(cmd) => cmd.run(&mut tracker).await?,
                Commands::Exercise(cmd) => cmd.run(&mut tracker).await?,
                Commands::Weight(cmd) => cmd.run(&mut tracker).await?,
                Commands::Waist(cmd) => cmd.run(&mut tracker).await?,
                Commands::Recipe(cmd) => cmd.run(&mut tracker).await?,
                Commands::Alerts(cmd) => cmd.run(&mut tracker).await?,
                Commands::Export(cmd) => cmd.run(&mut tracker).await?,
                Commands::Reset(cmd) => cmd.run(&mut tracker).await?,
                Commands::Config(_) => unreachable!(),
            }
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

async fn open_tracker(config: &Config) -> Result<Tracker, Box<dyn std::error::Error>> {
    let pool = init_db(&config.database_path).await?;
    let store = DocumentStore::new(pool, Some(config.user_id.clone()));
    let mut tracker = Tracker::new(store);
    tracker.load().await;
    Ok(tracker)
}
