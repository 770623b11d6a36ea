use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate};
use clap::Subcommand;
use studyplan_core::{
    Agenda, LearnerLevel, Progress, ScheduleRequest, ScheduledContent, ScheduledItem,
    StudyScheduler,
};

use super::{load_exams, load_plan, load_progress, CmdResult, Context};

#[derive(Subcommand)]
pub enum AgendaAction {
    /// Build and print the agenda
    Show {
        /// Plan JSON file
        #[arg(long)]
        plan: PathBuf,
        /// Exam catalog JSON file
        #[arg(long)]
        exams: Option<PathBuf>,
        /// Progress JSON file (completed goals and exam attempts)
        #[arg(long)]
        progress: Option<PathBuf>,
        /// First day to plan (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Override the learner level from the config
        #[arg(long)]
        level: Option<LearnerLevel>,
        /// Only print the first N study days
        #[arg(long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AgendaAction, ctx: &Context) -> CmdResult {
    match action {
        AgendaAction::Show {
            plan,
            exams,
            progress,
            start,
            level,
            days,
            json,
        } => {
            let config = ctx.load_config()?;
            let plan = load_plan(&plan)?;
            let exams = load_exams(exams.as_deref())?;
            let progress = load_progress(progress.as_deref())?;
            let start = start.unwrap_or_else(|| Local::now().date_naive());

            let request = ScheduleRequest::new(&plan, &config.routine, start, &progress)
                .with_exams(&exams)
                .with_level(level.unwrap_or(config.learner.level))
                .with_paused(config.learner.paused);
            let scheduler =
                StudyScheduler::with_config(config.scheduler.clone()).with_rule(config.durations.clone());
            let agenda = scheduler.build_agenda(&request);

            if json {
                println!("{}", serde_json::to_string_pretty(&agenda)?);
            } else {
                print_agenda(&agenda, &progress, days.unwrap_or(usize::MAX));
            }
        }
    }
    Ok(())
}

fn print_agenda(agenda: &Agenda, progress: &Progress, max_days: usize) {
    if agenda.is_empty() {
        println!("nothing scheduled");
        return;
    }

    for (date, items) in agenda.days().take(max_days) {
        let minutes: u64 = items.iter().map(|i| u64::from(i.duration_minutes)).sum();
        println!("{date} {} ({minutes} min)", date.weekday());
        for item in items {
            println!("  {}", format_item(item, progress));
        }
    }
    println!(
        "{} study days, {} min total",
        agenda.len(),
        agenda.total_minutes()
    );
}

fn format_item(item: &ScheduledItem, progress: &Progress) -> String {
    let mark = if item.is_completed(progress) { "[x]" } else { "[ ]" };
    match &item.content {
        ScheduledContent::Goal {
            goal,
            discipline_name,
            subject_name,
            ..
        } => format!(
            "{mark} {:>4}m  {discipline_name} / {subject_name}: {} ({:?})",
            item.duration_minutes, goal.title, goal.goal_type
        ),
        ScheduledContent::Exam {
            exam,
            estimated_minutes,
        } => format!(
            "{mark} {:>4}m  exam: {} ({} questions, ~{estimated_minutes}m)",
            item.duration_minutes, exam.title, exam.question_count
        ),
    }
}
