//! Goal duration estimation.
//!
//! The scheduler asks a [`DurationRule`] how many minutes a goal costs for a
//! given learner level. [`DurationTable`] is the bundled policy; callers can
//! plug any rule (including a plain closure).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::plan::{Goal, GoalType};

/// Fallback for a non-lesson goal that resolves to zero minutes.
pub const NON_LESSON_FLOOR_MINUTES: u32 = 15;
/// Fallback for anything still at zero.
pub const ZERO_DURATION_FLOOR_MINUTES: u32 = 30;

/// Learner proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LearnerLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl fmt::Display for LearnerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

impl FromStr for LearnerLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "iniciante" => Ok(Self::Beginner),
            "intermediate" | "intermediario" => Ok(Self::Intermediate),
            "advanced" | "avancado" => Ok(Self::Advanced),
            other => Err(format!("unknown learner level: {other}")),
        }
    }
}

/// Estimates the study cost of a goal.
pub trait DurationRule {
    fn estimate_minutes(&self, goal: &Goal, level: LearnerLevel) -> u32;
}

impl<F> DurationRule for F
where
    F: Fn(&Goal, LearnerLevel) -> u32,
{
    fn estimate_minutes(&self, goal: &Goal, level: LearnerLevel) -> u32 {
        self(goal, level)
    }
}

/// A value that varies with the learner level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerLevel {
    pub beginner: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl PerLevel {
    pub fn get(&self, level: LearnerLevel) -> f64 {
        match level {
            LearnerLevel::Beginner => self.beginner,
            LearnerLevel::Intermediate => self.intermediate,
            LearnerLevel::Advanced => self.advanced,
        }
    }
}

/// Table-driven duration policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationTable {
    /// Multiplier over the recorded lesson length (pauses, notes)
    #[serde(default = "default_lesson_pace")]
    pub lesson_pace: PerLevel,
    #[serde(default = "default_minutes_per_page")]
    pub minutes_per_page: PerLevel,
    #[serde(default = "default_minutes_per_question")]
    pub minutes_per_question: PerLevel,
}

fn default_lesson_pace() -> PerLevel {
    PerLevel {
        beginner: 2.0,
        intermediate: 1.5,
        advanced: 1.0,
    }
}

fn default_minutes_per_page() -> PerLevel {
    PerLevel {
        beginner: 5.0,
        intermediate: 4.0,
        advanced: 3.0,
    }
}

fn default_minutes_per_question() -> PerLevel {
    PerLevel {
        beginner: 4.0,
        intermediate: 3.0,
        advanced: 2.0,
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self {
            lesson_pace: default_lesson_pace(),
            minutes_per_page: default_minutes_per_page(),
            minutes_per_question: default_minutes_per_question(),
        }
    }
}

fn scaled(base: u32, factor: f64) -> u32 {
    (base as f64 * factor).round().max(0.0) as u32
}

impl DurationRule for DurationTable {
    fn estimate_minutes(&self, goal: &Goal, level: LearnerLevel) -> u32 {
        let declared = goal.duration_minutes.unwrap_or(0);
        match goal.goal_type {
            GoalType::Lesson => {
                let recorded = goal.sub_lesson_minutes().unwrap_or(declared);
                scaled(recorded, self.lesson_pace.get(level))
            }
            GoalType::Reading => match goal.pages {
                Some(pages) => scaled(pages, self.minutes_per_page.get(level)),
                None => declared,
            },
            GoalType::Questions => match goal.questions {
                Some(count) => scaled(count, self.minutes_per_question.get(level)),
                None => declared,
            },
            GoalType::Review | GoalType::Summary | GoalType::Other => declared,
        }
    }
}

/// Resolve a goal's cost, never returning zero.
///
/// A zero estimate would let the allocator place goals forever on the same
/// day, so zero becomes 15 minutes for non-lesson goals and 30 otherwise.
pub fn resolve_minutes<R: DurationRule + ?Sized>(rule: &R, goal: &Goal, level: LearnerLevel) -> u32 {
    let mut minutes = rule.estimate_minutes(goal, level);
    if minutes == 0 && !goal.goal_type.is_lesson() {
        minutes = NON_LESSON_FLOOR_MINUTES;
    }
    if minutes == 0 {
        minutes = ZERO_DURATION_FLOOR_MINUTES;
    }
    minutes
}
