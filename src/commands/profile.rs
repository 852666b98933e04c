use clap::{Args, Subcommand};

use super::{check_tracker, OutputFormat};
use crate::models::{ActivityLevel, BodyType, Gender, UserInfoPatch};
use crate::tracker::Tracker;

#[derive(Args)]
pub struct ProfileCommand {
    #[command(subcommand)]
    pub command: ProfileSubcommand,
}

#[derive(Subcommand)]
pub enum ProfileSubcommand {
    /// Show the profile and computed metrics
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update profile fields
    Set {
        /// Age in years
        #[arg(long)]
        age: Option<String>,

        #[arg(long, value_enum)]
        gender: Option<Gender>,

        /// Height in cm
        #[arg(long)]
        height: Option<String>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<String>,

        /// Activity level for TDEE
        #[arg(long, value_enum)]
        activity: Option<ActivityLevel>,

        /// Target weight in kg
        #[arg(long)]
        goal_weight: Option<String>,

        /// Weekly weight change goal in kg
        #[arg(long)]
        weekly_goal: Option<String>,

        /// Waist circumference in cm
        #[arg(long)]
        waist: Option<String>,

        /// Body fat percentage
        #[arg(long)]
        body_fat: Option<String>,

        /// Lean mass in kg
        #[arg(long)]
        lean_mass: Option<String>,

        #[arg(long, value_enum)]
        body_type: Option<BodyType>,
    },
}

impl ProfileCommand {
    pub async fn run(&self, tracker: &mut Tracker) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ProfileSubcommand::Show { format } => {
                let info = &tracker.data().user_info;
                let metrics = tracker.metrics();

                match format {
                    OutputFormat::Json => {
                        println!(
                            "{}",
                            serde_json::to_string_pretty(&serde_json::json!({
                                "profile": info,
                                "metrics": metrics,
                            }))?
                        );
                    }
                    OutputFormat::Text => {
                        println!("Profile");
                        println!("=======\n");
                        println!("Age:            {}", display(&info.age));
                        println!(
                            "Gender:         {}",
                            info.gender.map(|g| g.to_string()).unwrap_or_else(|| "-".into())
                        );
                        println!("Height:         {} cm", display(&info.height));
                        println!("Weight:         {} kg", display(&info.weight));
                        println!("Activity level: {}", info.activity_level);
                        println!("Goal weight:    {} kg", display(&info.goal_weight));
                        println!("Waist:          {} cm", display(&info.waist));
                        println!("Body fat:       {} %", display(&info.body_fat));

                        if metrics.bmr > 0 {
                            println!("\nMetrics");
                            println!("-------");
                            println!("BMI:  {} ({})", metrics.bmi, metrics.bmi_category);
                            println!("BMR:  {} kcal/day", metrics.bmr);
                            println!("TDEE: {} kcal/day", metrics.tdee);
                        } else {
                            println!("\nMetrics unavailable: set age, gender, height and weight");
                        }
                    }
                }
                Ok(())
            }

            ProfileSubcommand::Set {
                age,
                gender,
                height,
                weight,
                activity,
                goal_weight,
                weekly_goal,
                waist,
                body_fat,
                lean_mass,
                body_type,
            } => {
                let patch = UserInfoPatch {
                    age: age.clone(),
                    gender: *gender,
                    height: height.clone(),
                    weight: weight.clone(),
                    activity_level: *activity,
                    goal_weight: goal_weight.clone(),
                    weekly_goal: weekly_goal.clone(),
                    waist: waist.clone(),
                    body_fat: body_fat.clone(),
                    lean_mass: lean_mass.clone(),
                    body_type: *body_type,
                };

                let has_updates = patch.age.is_some()
                    || patch.gender.is_some()
                    || patch.height.is_some()
                    || patch.weight.is_some()
                    || patch.activity_level.is_some()
                    || patch.goal_weight.is_some()
                    || patch.weekly_goal.is_some()
                    || patch.waist.is_some()
                    || patch.body_fat.is_some()
                    || patch.lean_mass.is_some()
                    || patch.body_type.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                tracker.update_user_info(patch).await;
                check_tracker(tracker)?;

                println!("Profile updated");
                let metrics = tracker.metrics();
                if metrics.bmr > 0 {
                    println!("BMI {} ({}), TDEE {} kcal/day", metrics.bmi, metrics.bmi_category, metrics.tdee);
                }
                Ok(())
            }
        }
    }
}

fn display(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
