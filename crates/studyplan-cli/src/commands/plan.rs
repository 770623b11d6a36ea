use std::path::PathBuf;

use clap::Subcommand;

use super::{load_exams, load_plan, CmdResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Report structural problems in a plan
    Check {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,
        /// Exam catalog JSON file, needed to resolve exam items
        #[arg(long)]
        exams: Option<PathBuf>,
    },
}

pub fn run(action: PlanAction) -> CmdResult {
    match action {
        PlanAction::Check { plan, exams } => {
            let plan = load_plan(&plan)?;
            let exams = load_exams(exams.as_deref())?;
            let issues = plan.lint(&exams);
            if !issues.is_empty() {
                for issue in &issues {
                    println!("{issue}");
                }
                return Err(format!("plan has {} issue(s)", issues.len()).into());
            }
            println!(
                "ok: {} disciplines, {} goals, {} cycles ({:?})",
                plan.disciplines.len(),
                plan.goal_count(),
                plan.cycles.len(),
                plan.cycle_system
            );
        }
    }
    Ok(())
}
