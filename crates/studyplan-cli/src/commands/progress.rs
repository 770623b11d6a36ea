use std::path::PathBuf;

use clap::Subcommand;

use super::{load_plan, load_progress, save_progress, CmdResult};

#[derive(Subcommand)]
pub enum ProgressAction {
    /// Show completion per discipline
    Show {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,
        /// Progress JSON file
        #[arg(long)]
        progress: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark goals as completed
    Complete {
        /// Progress JSON file (created if missing)
        #[arg(long)]
        progress: PathBuf,
        /// Goal ids
        #[arg(required = true)]
        goals: Vec<String>,
    },
}

pub fn run(action: ProgressAction) -> CmdResult {
    match action {
        ProgressAction::Show {
            plan,
            progress,
            json,
        } => {
            let plan = load_plan(&plan)?;
            let progress = load_progress(progress.as_deref())?;
            let summary = progress.discipline_summary(&plan);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for row in &summary {
                    println!(
                        "{:<30} {:>4}/{:<4} {:>5.1}%",
                        row.discipline_name, row.completed_goals, row.total_goals, row.percentage
                    );
                }
            }
        }
        ProgressAction::Complete { progress, goals } => {
            let mut current = load_progress(Some(&progress))?;
            let count = goals.len();
            for goal in goals {
                current.complete_goal(goal);
            }
            save_progress(&progress, &current)?;
            println!("{count} goal(s) marked as completed");
        }
    }
    Ok(())
}
