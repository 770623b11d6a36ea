//! # Studyplan Core Library
//!
//! This library provides the core logic for Studyplan, a study-plan
//! scheduler. All operations are available through the standalone CLI
//! binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Plan**: disciplines, subjects and goals, plus the study cycles that
//!   decide in which order disciplines are visited
//! - **Scheduler**: a pure, deterministic day-by-day allocator that turns a
//!   plan, a weekly routine and the learner's progress into an agenda
//! - **Duration**: the pluggable rule estimating how long a goal takes
//! - **Exam**: simulated tests, attempts and grading
//! - **Storage**: TOML-based configuration and JSON snapshot loading
//!
//! ## Key Components
//!
//! - [`StudyScheduler`]: builds an [`Agenda`] from a [`ScheduleRequest`]
//! - [`Plan`]: the study plan tree and its cycles
//! - [`DurationRule`]: trait for goal duration policies
//! - [`Config`]: application configuration management

pub mod duration;
pub mod error;
pub mod exam;
pub mod plan;
pub mod progress;
pub mod routine;
pub mod scheduler;
pub mod storage;

pub use duration::{resolve_minutes, DurationRule, DurationTable, LearnerLevel, PerLevel};
pub use error::{ConfigError, CoreError, ValidationError};
pub use exam::{Exam, ExamAttempt, ExamOutcome};
pub use plan::{Cycle, CycleItem, CycleSystem, Discipline, Folder, Goal, GoalType, Plan, Subject, SubLesson};
pub use progress::{DisciplineProgress, Progress};
pub use routine::Routine;
pub use scheduler::{Agenda, ScheduleRequest, ScheduledContent, ScheduledItem, SchedulerConfig, StudyScheduler};
pub use storage::{Config, LearnerConfig};
