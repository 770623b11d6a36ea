use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Subcommand;

use super::{load_exams, load_progress, save_progress, CmdResult};

#[derive(Subcommand)]
pub enum ExamAction {
    /// Grade an answer sheet
    Grade {
        /// Exam catalog JSON file
        #[arg(long)]
        exams: PathBuf,
        /// Exam id
        #[arg(long)]
        exam: String,
        /// Answers as JSON, e.g. '{"1":"A","2":"C"}'
        #[arg(long)]
        answers: String,
        /// Record the attempt in this progress file
        #[arg(long)]
        record: Option<PathBuf>,
    },
}

pub fn run(action: ExamAction) -> CmdResult {
    match action {
        ExamAction::Grade {
            exams,
            exam,
            answers,
            record,
        } => {
            let catalog = load_exams(Some(&exams))?;
            let exam = catalog
                .iter()
                .find(|e| e.id == exam)
                .ok_or_else(|| format!("unknown exam: {exam}"))?;
            let answers: BTreeMap<u32, String> = serde_json::from_str(&answers)?;

            match record {
                Some(path) => {
                    let mut progress = load_progress(Some(&path))?;
                    let attempt_id = format!("{}-{}", exam.id, progress.attempts.len() + 1);
                    let attempt = exam.attempt(attempt_id, &answers);
                    println!("{}", serde_json::to_string_pretty(&attempt)?);
                    progress.record_attempt(attempt);
                    save_progress(&path, &progress)?;
                }
                None => {
                    let outcome = exam.grade(&answers);
                    println!("{}", serde_json::to_string_pretty(&outcome)?);
                }
            }
        }
    }
    Ok(())
}
