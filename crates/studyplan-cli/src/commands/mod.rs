pub mod agenda;
pub mod config;
pub mod exam;
pub mod plan;
pub mod progress;
pub mod routine;

use std::path::{Path, PathBuf};

use studyplan_core::storage::read_json;
use studyplan_core::{Config, Exam, Plan, Progress};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Options shared by every subcommand.
pub struct Context {
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(config_path: Option<PathBuf>) -> Self {
        Self { config_path }
    }

    pub fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        let config = match &self.config_path {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    pub fn save_config(&self, config: &Config) -> CmdResult {
        match &self.config_path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Ok(())
    }
}

pub fn load_plan(path: &Path) -> Result<Plan, Box<dyn std::error::Error>> {
    Ok(read_json(path)?)
}

/// Missing file argument means an empty catalog.
pub fn load_exams(path: Option<&Path>) -> Result<Vec<Exam>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(read_json(path)?),
        None => Ok(Vec::new()),
    }
}

/// Missing file argument (or a file not created yet) means no progress.
pub fn load_progress(path: Option<&Path>) -> Result<Progress, Box<dyn std::error::Error>> {
    match path {
        Some(path) if path.exists() => Ok(read_json(path)?),
        _ => Ok(Progress::new()),
    }
}

pub fn save_progress(path: &Path, progress: &Progress) -> CmdResult {
    std::fs::write(path, serde_json::to_string_pretty(progress)?)?;
    Ok(())
}
